use super::aggregate::{weather_effect, weekday_effect, GroupMean};
use super::filter::DateFilter;
use super::model::{DailyRecord, RentalDataset};

// ---------------------------------------------------------------------------
// Continuous measures for the scatter plots
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Temperature,
    Humidity,
    Windspeed,
}

impl Measure {
    pub const ALL: [Measure; 3] = [Measure::Temperature, Measure::Humidity, Measure::Windspeed];

    pub fn value(self, record: &DailyRecord) -> f64 {
        match self {
            Measure::Temperature => record.temperature,
            Measure::Humidity => record.humidity,
            Measure::Windspeed => record.windspeed,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Measure::Temperature => "Temperature",
            Measure::Humidity => "Humidity",
            Measure::Windspeed => "Wind speed",
        }
    }

    pub fn axis_label(self) -> String {
        format!("{} (normalized)", self.name())
    }
}

/// `[measure, rental_count]` pairs for one scatter plot.
pub fn scatter_points(records: &[DailyRecord], measure: Measure) -> Vec<[f64; 2]> {
    records
        .iter()
        .map(|r| [measure.value(r), f64::from(r.rental_count)])
        .collect()
}

// ---------------------------------------------------------------------------
// DashboardView – everything one render pass needs
// ---------------------------------------------------------------------------

/// Filtered subset plus the two aggregated tables, recomputed whenever the
/// applied filter changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    pub records: Vec<DailyRecord>,
    pub weather: Vec<GroupMean>,
    pub weekday: Vec<GroupMean>,
}

impl DashboardView {
    pub fn compute(dataset: &RentalDataset, filter: &DateFilter) -> Self {
        let records = filter.apply(dataset.records());
        let weather = weather_effect(&records);
        let weekday = weekday_effect(&records);
        DashboardView {
            records,
            weather,
            weekday,
        }
    }

    /// Nothing to plot.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::model::record;

    fn two_days() -> RentalDataset {
        RentalDataset::from_records(vec![
            record("2011-01-01", 6, 1, 100),
            record("2011-01-02", 0, 2, 200),
        ])
        .unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn covering_range_aggregates_both_days() {
        let ds = two_days();
        let view = DashboardView::compute(&ds, &DateFilter::covering(&ds));
        assert_eq!(view.records.len(), 2);
        let weather: Vec<(&str, f64)> = view.weather.iter().map(|g| (g.label.as_str(), g.mean)).collect();
        assert_eq!(weather, vec![("Clear", 100.0), ("Cloudy/Overcast", 200.0)]);
        let weekday: Vec<&str> = view.weekday.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(weekday, vec!["Sunday", "Saturday"]);
    }

    #[test]
    fn range_without_matches_is_empty_everywhere() {
        let ds = two_days();
        let filter = DateFilter {
            start: date("2011-01-03"),
            end: date("2011-01-04"),
            include_all: false,
        };
        let view = DashboardView::compute(&ds, &filter);
        assert!(view.is_empty());
        assert!(view.weather.is_empty());
        assert!(view.weekday.is_empty());
        for m in Measure::ALL {
            assert!(scatter_points(&view.records, m).is_empty());
        }
    }

    #[test]
    fn scatter_pairs_measure_with_count() {
        let mut r = record("2011-01-01", 6, 1, 985);
        r.temperature = 0.34;
        r.humidity = 0.81;
        r.windspeed = 0.16;
        let records = [r];
        assert_eq!(scatter_points(&records, Measure::Temperature), vec![[0.34, 985.0]]);
        assert_eq!(scatter_points(&records, Measure::Humidity), vec![[0.81, 985.0]]);
        assert_eq!(scatter_points(&records, Measure::Windspeed), vec![[0.16, 985.0]]);
    }
}
