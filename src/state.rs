use std::path::PathBuf;

use chrono::NaiveDate;

use crate::color::{CategoryColors, Gradient};
use crate::data::filter::DateFilter;
use crate::data::model::{DayOfWeek, RentalDataset, WeatherSituation};
use crate::data::view::DashboardView;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The analysis shown in the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Weather,
    Weekday,
    Climate,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Weather, Tab::Weekday, Tab::Climate];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Weather => "Weather effect",
            Tab::Weekday => "Weekday comparison",
            Tab::Climate => "Temperature, humidity & wind",
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset; replaced only by File → Open.
    pub dataset: RentalDataset,

    /// Where `dataset` came from.
    pub source: PathBuf,

    /// Date picker values. Not used until the filter is applied.
    pub pending_start: NaiveDate,
    pub pending_end: NaiveDate,

    /// "Show all data" checkbox; takes effect immediately.
    pub include_all: bool,

    /// Range committed by the last "Apply filter".
    applied: DateFilter,

    /// Filtered records and aggregates for the current parameters (cached).
    pub view: DashboardView,

    pub tab: Tab,

    pub weather_colors: CategoryColors,
    pub weekday_colors: CategoryColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: RentalDataset, source: PathBuf) -> Self {
        let applied = DateFilter::covering(&dataset);
        let view = DashboardView::compute(&dataset, &applied);
        Self {
            pending_start: applied.start,
            pending_end: applied.end,
            include_all: false,
            applied,
            view,
            dataset,
            source,
            tab: Tab::Weather,
            weather_colors: CategoryColors::new(
                Gradient::COOL_WARM,
                WeatherSituation::Clear.code(),
                WeatherSituation::ALL.len(),
            ),
            weekday_colors: CategoryColors::new(
                Gradient::VIRIDIS,
                DayOfWeek::Sunday.code(),
                DayOfWeek::ALL.len(),
            ),
            status_message: None,
        }
    }

    /// Swap in a newly loaded dataset and reset the date range to its bounds.
    pub fn set_dataset(&mut self, dataset: RentalDataset, source: PathBuf) {
        self.applied = DateFilter {
            include_all: self.include_all,
            ..DateFilter::covering(&dataset)
        };
        self.pending_start = self.applied.start;
        self.pending_end = self.applied.end;
        self.dataset = dataset;
        self.source = source;
        self.status_message = None;
        self.refresh();
    }

    /// Parameters the current view was computed from.
    pub fn applied(&self) -> &DateFilter {
        &self.applied
    }

    /// Commit the date pickers.
    pub fn apply_filter(&mut self) {
        self.applied.start = self.pending_start;
        self.applied.end = self.pending_end;
        self.refresh();
    }

    pub fn set_include_all(&mut self, include_all: bool) {
        self.include_all = include_all;
        self.applied.include_all = include_all;
        self.refresh();
    }

    /// Put the pickers back on the dataset bounds and apply.
    pub fn reset_range(&mut self) {
        let (start, end) = self.dataset.date_bounds();
        self.pending_start = start;
        self.pending_end = end;
        self.apply_filter();
    }

    /// Whether the pickers differ from what is applied.
    pub fn has_pending_changes(&self) -> bool {
        self.pending_start != self.applied.start || self.pending_end != self.applied.end
    }

    fn refresh(&mut self) {
        self.view = DashboardView::compute(&self.dataset, &self.applied);
        log::debug!(
            "Filter {} .. {} (include all: {}) → {} of {} days",
            self.applied.start,
            self.applied.end,
            self.applied.include_all,
            self.view.records.len(),
            self.dataset.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn state() -> AppState {
        let ds = RentalDataset::from_records(vec![
            record("2011-01-01", 6, 1, 100),
            record("2011-01-02", 0, 2, 200),
            record("2011-01-03", 1, 1, 300),
            record("2011-01-04", 2, 3, 50),
        ])
        .unwrap();
        AppState::new(ds, PathBuf::from("day.csv"))
    }

    #[test]
    fn starts_on_full_range() {
        let s = state();
        assert_eq!(s.pending_start, date("2011-01-01"));
        assert_eq!(s.pending_end, date("2011-01-04"));
        assert_eq!(s.view.records.len(), 4);
        assert!(!s.has_pending_changes());
    }

    #[test]
    fn picker_edits_wait_for_apply() {
        let mut s = state();
        s.pending_start = date("2011-01-02");
        s.pending_end = date("2011-01-03");
        assert!(s.has_pending_changes());
        assert_eq!(s.view.records.len(), 4);

        s.apply_filter();
        assert!(!s.has_pending_changes());
        let counts: Vec<u32> = s.view.records.iter().map(|r| r.rental_count).collect();
        assert_eq!(counts, vec![200, 300]);
        assert_eq!(s.view.weekday.len(), 2);
    }

    #[test]
    fn include_all_overrides_applied_range() {
        let mut s = state();
        s.pending_start = date("2011-01-04");
        s.pending_end = date("2011-01-01");
        s.apply_filter();
        assert!(s.view.is_empty());
        assert!(s.view.weather.is_empty());

        s.set_include_all(true);
        assert_eq!(s.view.records.len(), 4);

        // Date edits while "show all" is on change nothing visible.
        s.pending_start = date("2011-01-03");
        s.apply_filter();
        assert_eq!(s.view.records.len(), 4);

        s.set_include_all(false);
        assert_eq!(s.view.records.len(), 0);
    }

    #[test]
    fn reset_restores_bounds() {
        let mut s = state();
        s.pending_start = date("2011-01-03");
        s.apply_filter();
        assert_eq!(s.view.records.len(), 2);
        s.reset_range();
        assert_eq!(s.view.records.len(), 4);
        assert_eq!(s.applied().start, date("2011-01-01"));
    }

    #[test]
    fn new_dataset_resets_range() {
        let mut s = state();
        s.pending_end = date("2011-01-01");
        s.apply_filter();
        let ds = RentalDataset::from_records(vec![
            record("2012-06-01", 5, 1, 7000),
            record("2012-06-02", 6, 1, 6500),
        ])
        .unwrap();
        s.set_dataset(ds, PathBuf::from("other.csv"));
        assert_eq!(s.applied().start, date("2012-06-01"));
        assert_eq!(s.pending_end, date("2012-06-02"));
        assert_eq!(s.view.records.len(), 2);
        assert_eq!(s.source, PathBuf::from("other.csv"));
    }
}
