use std::collections::BTreeMap;

use super::model::{DailyRecord, DayOfWeek, LabelMap, WeatherSituation};

/// Mean rental count of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    /// Raw category code.
    pub code: u8,
    /// Display name, or the code itself when the label map has no entry.
    pub label: String,
    pub mean: f64,
    /// Number of days in the group.
    pub count: usize,
}

/// Group `records` by `key_fn` and average `rental_count` per group.
///
/// Rows come out in ascending code order. An empty input gives an empty
/// table.
pub fn aggregate_by<K>(records: &[DailyRecord], key_fn: K, label_map: LabelMap) -> Vec<GroupMean>
where
    K: Fn(&DailyRecord) -> u8,
{
    let mut groups: BTreeMap<u8, (u64, usize)> = BTreeMap::new();
    for r in records {
        let (sum, n) = groups.entry(key_fn(r)).or_default();
        *sum += u64::from(r.rental_count);
        *n += 1;
    }

    groups
        .into_iter()
        .map(|(code, (sum, n))| GroupMean {
            code,
            label: label_map(code)
                .map(str::to_string)
                .unwrap_or_else(|| code.to_string()),
            mean: sum as f64 / n as f64,
            count: n,
        })
        .collect()
}

/// Average rentals per weather situation.
pub fn weather_effect(records: &[DailyRecord]) -> Vec<GroupMean> {
    aggregate_by(records, |r| r.weather_situation, WeatherSituation::label_for)
}

/// Average rentals per day of week, Sunday first.
pub fn weekday_effect(records: &[DailyRecord]) -> Vec<GroupMean> {
    aggregate_by(records, |r| r.weekday, DayOfWeek::label_for)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn labels(table: &[GroupMean]) -> Vec<&str> {
        table.iter().map(|g| g.label.as_str()).collect()
    }

    #[test]
    fn two_day_weather_scenario() {
        let records = vec![
            record("2011-01-01", 6, 1, 100),
            record("2011-01-02", 0, 2, 200),
        ];
        let table = weather_effect(&records);
        let pairs: Vec<(&str, f64)> = table.iter().map(|g| (g.label.as_str(), g.mean)).collect();
        assert_eq!(pairs, vec![("Clear", 100.0), ("Cloudy/Overcast", 200.0)]);
    }

    #[test]
    fn mean_per_group_counts_every_record_once() {
        let records = vec![
            record("2011-01-01", 6, 1, 100),
            record("2011-01-02", 0, 1, 301),
            record("2011-01-03", 1, 3, 50),
            record("2011-01-04", 2, 1, 200),
            record("2011-01-05", 3, 3, 70),
        ];
        let table = weather_effect(&records);
        assert_eq!(labels(&table), vec!["Clear", "Light Rain/Snow"]);
        assert_eq!(table[0].count, 3);
        assert!((table[0].mean - 601.0 / 3.0).abs() < 1e-9);
        assert_eq!(table[1].count, 2);
        assert_eq!(table[1].mean, 60.0);
        let total: usize = table.iter().map(|g| g.count).sum();
        assert_eq!(total, records.len());
    }

    #[test]
    fn weekdays_come_out_sunday_first() {
        // Insert in a scrambled order to make sure output follows the code.
        let records: Vec<DailyRecord> = [3u8, 6, 0, 5, 1, 4, 2]
            .iter()
            .enumerate()
            .map(|(i, &wd)| record(&format!("2011-02-{:02}", i + 1), wd, 1, 10 * (wd as u32 + 1)))
            .collect();
        let table = weekday_effect(&records);
        assert_eq!(
            labels(&table),
            vec!["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"]
        );
        assert_eq!(table[0].mean, 10.0);
        assert_eq!(table[6].mean, 70.0);
    }

    #[test]
    fn unmapped_code_keeps_raw_label() {
        let records = vec![
            record("2011-01-01", 6, 1, 100),
            record("2011-01-02", 0, 7, 40),
        ];
        let table = weather_effect(&records);
        assert_eq!(labels(&table), vec!["Clear", "7"]);
        assert_eq!(table[1].code, 7);
        assert_eq!(table[1].mean, 40.0);
    }

    #[test]
    fn empty_input_gives_empty_table() {
        assert!(weather_effect(&[]).is_empty());
        assert!(weekday_effect(&[]).is_empty());
    }

    #[test]
    fn custom_key_and_labels() {
        fn parity(code: u8) -> Option<&'static str> {
            match code {
                0 => Some("weekend"),
                1 => Some("weekday"),
                _ => None,
            }
        }
        let records = vec![
            record("2011-01-01", 6, 1, 100),
            record("2011-01-02", 0, 1, 200),
            record("2011-01-03", 1, 1, 400),
        ];
        let table = aggregate_by(
            &records,
            |r| u8::from(r.weekday != 0 && r.weekday != 6),
            parity,
        );
        assert_eq!(labels(&table), vec!["weekend", "weekday"]);
        assert_eq!(table[0].mean, 150.0);
        assert_eq!(table[1].mean, 400.0);
    }
}
