use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Date32Type, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use chrono::{NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{DailyRecord, DatasetError, RentalDataset};

/// Columns every source must provide. Anything else is ignored.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "dteday",
    "weekday",
    "weathersit",
    "temp",
    "hum",
    "windspeed",
    "cnt",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the day table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one day per line (the `day.csv` layout)
/// * `.json`    – `[{ "dteday": "2011-01-01", "cnt": 985, ... }, ...]`
/// * `.parquet` – one column per field; `dteday` may be text or a date type
pub fn load_file(path: &Path) -> Result<RentalDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => {
            let file = File::open(path)
                .with_context(|| format!("opening CSV file {}", path.display()))?;
            read_csv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading JSON file {}", path.display()))?;
            parse_json(&text)
        }
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    let (first, last) = dataset.date_bounds();
    log::info!(
        "Loaded {} days ({first} .. {last}) from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD` and a date with a time-of-day suffix.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y/%m/%d"))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
                .ok()
                .map(|dt| dt.date())
        })
}

fn check_columns<'a>(present: impl IntoIterator<Item = &'a str>) -> Result<(), DatasetError> {
    let present: Vec<&str> = present.into_iter().map(str::trim).collect();
    match REQUIRED_COLUMNS.iter().find(|c| !present.contains(*c)) {
        Some(missing) => Err(DatasetError::MissingColumn(missing.to_string())),
        None => Ok(()),
    }
}

/// Wrap up a freshly parsed record list.
fn finish(records: Vec<DailyRecord>) -> Result<RentalDataset> {
    let dataset = RentalDataset::from_records(records)?;
    let unmapped = dataset.unmapped_count();
    if unmapped > 0 {
        log::warn!("{unmapped} day(s) carry a weather or weekday code without a label");
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Row-oriented sources (CSV, JSON)
// ---------------------------------------------------------------------------

/// One row as it appears in `day.csv`.
#[derive(Debug, Deserialize)]
struct RawDay {
    dteday: String,
    weekday: u8,
    weathersit: u8,
    temp: f64,
    hum: f64,
    windspeed: f64,
    cnt: u32,
}

impl RawDay {
    fn into_record(self, row: usize) -> Result<DailyRecord, DatasetError> {
        let date = parse_date(&self.dteday).ok_or(DatasetError::InvalidDate {
            row,
            value: self.dteday,
        })?;
        Ok(DailyRecord {
            date,
            weekday: self.weekday,
            weather_situation: self.weathersit,
            temperature: self.temp,
            humidity: self.hum,
            windspeed: self.windspeed,
            rental_count: self.cnt,
        })
    }
}

/// CSV layout: header row with column names, one day per line.
pub fn read_csv<R: Read>(source: R) -> Result<RentalDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);
    let headers = reader.headers().context("reading CSV headers")?.clone();
    check_columns(headers.iter())?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawDay>().enumerate() {
        // Line 1 is the header.
        let line = row_no + 2;
        let raw = result.with_context(|| format!("CSV line {line}"))?;
        let record = raw
            .into_record(row_no)
            .with_context(|| format!("CSV line {line}"))?;
        records.push(record);
    }
    finish(records)
}

/// Records-oriented JSON, i.e. `df.to_json(orient='records', date_format='iso')`.
pub fn parse_json(text: &str) -> Result<RentalDataset> {
    let rows: Vec<serde_json::Map<String, serde_json::Value>> =
        serde_json::from_str(text).context("Expected a JSON array of objects")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        check_columns(row.keys().map(String::as_str))
            .with_context(|| format!("Row {i}"))?;
        let raw: RawDay = serde_json::from_value(serde_json::Value::Object(row))
            .with_context(|| format!("Row {i}"))?;
        records.push(raw.into_record(i)?);
    }
    finish(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
///
/// Integer columns may use any integer width, float columns Float32 or
/// Float64; `dteday` may be Utf8, Date32, Date64 or a timestamp.
fn load_parquet(path: &Path) -> Result<RentalDataset> {
    let file = File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let first_row = records.len();
        records.extend(batch_records(&batch, first_row)?);
    }
    finish(records)
}

fn batch_records(batch: &RecordBatch, first_row: usize) -> Result<Vec<DailyRecord>> {
    let schema = batch.schema();
    check_columns(schema.fields().iter().map(|f| f.name().as_str()))?;

    let dates = date_column(batch, first_row)?;
    let weekday = int_column::<u8>(batch, "weekday", first_row)?;
    let weather = int_column::<u8>(batch, "weathersit", first_row)?;
    let temp = float_column(batch, "temp", first_row)?;
    let hum = float_column(batch, "hum", first_row)?;
    let wind = float_column(batch, "windspeed", first_row)?;
    let cnt = int_column::<u32>(batch, "cnt", first_row)?;

    Ok((0..batch.num_rows())
        .map(|i| DailyRecord {
            date: dates[i],
            weekday: weekday[i],
            weather_situation: weather[i],
            temperature: temp[i],
            humidity: hum[i],
            windspeed: wind[i],
            rental_count: cnt[i],
        })
        .collect())
}

// -- Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(name)
        .ok_or_else(|| anyhow::Error::from(DatasetError::MissingColumn(name.to_string())))
}

fn cast_column(batch: &RecordBatch, name: &str, to: &DataType) -> Result<ArrayRef> {
    let col = column(batch, name)?;
    cast(col, to).with_context(|| format!("column '{name}' ({}) is not {to}", col.data_type()))
}

fn float_column(batch: &RecordBatch, name: &str, first_row: usize) -> Result<Vec<f64>> {
    let arr = cast_column(batch, name, &DataType::Float64)?;
    let arr = arr.as_primitive::<Float64Type>();
    (0..arr.len())
        .map(|i| {
            if arr.is_null(i) {
                bail!("Row {}: '{name}' is null", first_row + i);
            }
            Ok(arr.value(i))
        })
        .collect()
}

fn int_column<T: TryFrom<i64>>(batch: &RecordBatch, name: &str, first_row: usize) -> Result<Vec<T>> {
    let values = match column(batch, name)?.data_type() {
        DataType::Float16 | DataType::Float32 | DataType::Float64 => {
            whole_floats(batch, name, first_row)?
        }
        _ => {
            let arr = cast_column(batch, name, &DataType::Int64)?;
            let arr = arr.as_primitive::<Int64Type>();
            (0..arr.len())
                .map(|i| {
                    if arr.is_null(i) {
                        bail!("Row {}: '{name}' is null", first_row + i);
                    }
                    Ok(arr.value(i))
                })
                .collect::<Result<Vec<i64>>>()?
        }
    };

    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            T::try_from(v)
                .map_err(|_| anyhow::anyhow!("Row {}: '{name}' value {v} is out of range", first_row + i))
        })
        .collect()
}

/// Float-typed integer column (pandas writes these when a column held NaN).
/// A cast would truncate, so fractional values are rejected instead.
fn whole_floats(batch: &RecordBatch, name: &str, first_row: usize) -> Result<Vec<i64>> {
    float_column(batch, name, first_row)?
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            if !v.is_finite() || v.fract() != 0.0 {
                bail!("Row {}: '{name}' value {v} is not a whole number", first_row + i);
            }
            Ok(v as i64)
        })
        .collect()
}

fn date_column(batch: &RecordBatch, first_row: usize) -> Result<Vec<NaiveDate>> {
    let col = column(batch, "dteday")?;
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            let arr = cast_column(batch, "dteday", &DataType::Utf8)?;
            let arr = arr.as_string::<i32>();
            (0..arr.len())
                .map(|i| {
                    let value = if arr.is_null(i) { "" } else { arr.value(i) };
                    parse_date(value).ok_or_else(|| {
                        anyhow::Error::from(DatasetError::InvalidDate {
                            row: first_row + i,
                            value: value.to_string(),
                        })
                    })
                })
                .collect()
        }
        _ => {
            let arr = cast_column(batch, "dteday", &DataType::Date32)?;
            let arr = arr.as_primitive::<Date32Type>();
            (0..arr.len())
                .map(|i| {
                    let date = if arr.is_null(i) { None } else { arr.value_as_date(i) };
                    date.ok_or_else(|| {
                        anyhow::Error::from(DatasetError::InvalidDate {
                            row: first_row + i,
                            value: "<null>".to_string(),
                        })
                    })
                })
                .collect()
        }
    }
}
