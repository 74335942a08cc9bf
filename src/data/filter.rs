use chrono::NaiveDate;

use super::model::{DailyRecord, RentalDataset};

// ---------------------------------------------------------------------------
// Date-range predicate
// ---------------------------------------------------------------------------

/// Return the records whose date lies in `start..=end`.
///
/// * `include_all` → every record, whatever the dates say
/// * `start > end` → empty, not an error
pub fn filter_records(
    records: &[DailyRecord],
    start: NaiveDate,
    end: NaiveDate,
    include_all: bool,
) -> Vec<DailyRecord> {
    if include_all {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| start <= r.date && r.date <= end)
        .copied()
        .collect()
}

/// The three user-supplied filter parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFilter {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub include_all: bool,
}

impl DateFilter {
    /// Range spanning the whole dataset, date filtering enabled.
    pub fn covering(dataset: &RentalDataset) -> Self {
        let (start, end) = dataset.date_bounds();
        DateFilter {
            start,
            end,
            include_all: false,
        }
    }

    pub fn apply(&self, records: &[DailyRecord]) -> Vec<DailyRecord> {
        filter_records(records, self.start, self.end, self.include_all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn week() -> Vec<DailyRecord> {
        vec![
            record("2011-01-01", 6, 1, 985),
            record("2011-01-02", 0, 2, 801),
            record("2011-01-03", 1, 1, 1349),
            record("2011-01-05", 3, 1, 1600),
            record("2011-01-06", 4, 1, 1606),
        ]
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let out = filter_records(&week(), date("2011-01-02"), date("2011-01-05"), false);
        let counts: Vec<u32> = out.iter().map(|r| r.rental_count).collect();
        assert_eq!(counts, vec![801, 1349, 1600]);
    }

    #[test]
    fn gaps_in_dates_are_not_filled() {
        let out = filter_records(&week(), date("2011-01-04"), date("2011-01-04"), false);
        assert!(out.is_empty());
    }

    #[test]
    fn inverted_range_is_empty() {
        let out = filter_records(&week(), date("2011-01-05"), date("2011-01-02"), false);
        assert!(out.is_empty());
    }

    #[test]
    fn include_all_ignores_dates() {
        let records = week();
        let out = filter_records(&records, date("2030-01-01"), date("2000-01-01"), true);
        assert_eq!(out, records);
    }

    #[test]
    fn covering_filter_keeps_everything() {
        let ds = RentalDataset::from_records(week()).unwrap();
        let filter = DateFilter::covering(&ds);
        assert_eq!(filter.start, date("2011-01-01"));
        assert_eq!(filter.end, date("2011-01-06"));
        assert!(!filter.include_all);
        assert_eq!(filter.apply(ds.records()).len(), ds.len());
    }
}
