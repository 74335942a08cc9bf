use std::collections::BTreeSet;

use chrono::NaiveDate;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Dataset errors
// ---------------------------------------------------------------------------

/// Structural problems that make a dataset unusable.
#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("dataset contains no records")]
    Empty,
    #[error("date {0} appears more than once")]
    DuplicateDate(NaiveDate),
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    /// `row` counts data rows from 0, header excluded.
    #[error("data row {row}: '{value}' is not a valid date")]
    InvalidDate { row: usize, value: String },
}

// ---------------------------------------------------------------------------
// Category label maps
// ---------------------------------------------------------------------------

/// Lookup from a raw category code to its display name.
pub type LabelMap = fn(u8) -> Option<&'static str>;

/// Weather situation, ordered from best (`Clear`) to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WeatherSituation {
    Clear,
    Cloudy,
    LightPrecipitation,
    HeavyPrecipitation,
}

impl WeatherSituation {
    pub const ALL: [WeatherSituation; 4] = [
        WeatherSituation::Clear,
        WeatherSituation::Cloudy,
        WeatherSituation::LightPrecipitation,
        WeatherSituation::HeavyPrecipitation,
    ];

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(WeatherSituation::Clear),
            2 => Some(WeatherSituation::Cloudy),
            3 => Some(WeatherSituation::LightPrecipitation),
            4 => Some(WeatherSituation::HeavyPrecipitation),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            WeatherSituation::Clear => 1,
            WeatherSituation::Cloudy => 2,
            WeatherSituation::LightPrecipitation => 3,
            WeatherSituation::HeavyPrecipitation => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeatherSituation::Clear => "Clear",
            WeatherSituation::Cloudy => "Cloudy/Overcast",
            WeatherSituation::LightPrecipitation => "Light Rain/Snow",
            WeatherSituation::HeavyPrecipitation => "Heavy Rain/Snow",
        }
    }

    /// [`LabelMap`] for `weathersit` codes.
    pub fn label_for(code: u8) -> Option<&'static str> {
        Self::from_code(code).map(Self::label)
    }
}

/// Day of week as coded in the dataset: 0 = Sunday … 6 = Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }

    /// [`LabelMap`] for `weekday` codes.
    pub fn label_for(code: u8) -> Option<&'static str> {
        Self::from_code(code).map(Self::label)
    }
}

// ---------------------------------------------------------------------------
// DailyRecord – one row of the day table
// ---------------------------------------------------------------------------

/// One day of aggregated rental statistics.
///
/// Category codes are kept raw so that an unexpected code still shows up in
/// the aggregates instead of disappearing; use [`DailyRecord::weather`] and
/// [`DailyRecord::day_of_week`] for the typed view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub weekday: u8,
    pub weather_situation: u8,
    /// Normalized temperature in `[0, 1]`.
    pub temperature: f64,
    /// Normalized humidity in `[0, 1]`.
    pub humidity: f64,
    /// Normalized wind speed in `[0, 1]`.
    pub windspeed: f64,
    pub rental_count: u32,
}

impl DailyRecord {
    pub fn weather(&self) -> Option<WeatherSituation> {
        WeatherSituation::from_code(self.weather_situation)
    }

    pub fn day_of_week(&self) -> Option<DayOfWeek> {
        DayOfWeek::from_code(self.weekday)
    }

    /// Whether both category codes belong to their label sets.
    pub fn has_known_codes(&self) -> bool {
        self.weather().is_some() && self.day_of_week().is_some()
    }
}

// ---------------------------------------------------------------------------
// RentalDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded record set. Immutable once built; records are sorted by date
/// and every date is unique.
#[derive(Debug, Clone)]
pub struct RentalDataset {
    records: Vec<DailyRecord>,
}

impl RentalDataset {
    /// Validate and sort the records.
    pub fn from_records(mut records: Vec<DailyRecord>) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }
        records.sort_by_key(|r| r.date);

        let mut seen = BTreeSet::new();
        for r in &records {
            if !seen.insert(r.date) {
                return Err(DatasetError::DuplicateDate(r.date));
            }
        }
        Ok(RentalDataset { records })
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    /// Earliest and latest date. Never fails: construction rejects empty sets.
    pub fn date_bounds(&self) -> (NaiveDate, NaiveDate) {
        let first = self.records[0].date;
        let last = self.records[self.records.len() - 1].date;
        (first, last)
    }

    /// Rows whose weather or weekday code has no label.
    pub fn unmapped_count(&self) -> usize {
        self.records.iter().filter(|r| !r.has_known_codes()).count()
    }

    /// Number of days.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
pub(crate) fn record(date: &str, weekday: u8, weather: u8, cnt: u32) -> DailyRecord {
    DailyRecord {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        weekday,
        weather_situation: weather,
        temperature: 0.5,
        humidity: 0.5,
        windspeed: 0.2,
        rental_count: cnt,
    }
}
