use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Small deterministic PRNG (splitmix64); reproducible sample files matter
/// more than statistical quality here.
struct SplitMix {
    state: u64,
}

impl SplitMix {
    fn new(seed: u64) -> Self {
        SplitMix { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn around(&mut self, center: f64, spread: f64) -> f64 {
        center + (self.unit() - 0.5) * 2.0 * spread
    }
}

/// One output row, named after the `day.csv` columns.
#[derive(Debug, Serialize)]
struct SampleDay {
    dteday: String,
    weekday: i64,
    weathersit: i64,
    temp: f64,
    hum: f64,
    windspeed: f64,
    cnt: i64,
}

fn pick_weather(rng: &mut SplitMix) -> i64 {
    match rng.unit() {
        u if u < 0.63 => 1,
        u if u < 0.96 => 2,
        u if u < 0.995 => 3,
        _ => 4,
    }
}

fn generate(start: NaiveDate, days: u32, rng: &mut SplitMix) -> Vec<SampleDay> {
    start
        .iter_days()
        .take(days as usize)
        .enumerate()
        .map(|(i, date)| {
            // Seasonal curve peaking in mid July.
            let season = ((f64::from(date.ordinal()) - 15.0) / 365.0 * std::f64::consts::TAU)
                .cos();
            let temp = rng.around(0.5 - 0.3 * season, 0.08).clamp(0.05, 0.9);
            let weathersit = pick_weather(rng);
            let hum = rng.around(0.45 + 0.12 * weathersit as f64, 0.12).clamp(0.0, 1.0);
            let windspeed = rng.around(0.19, 0.09).clamp(0.02, 0.5);
            let weekday = i64::from(date.weekday().num_days_from_sunday());

            let growth = 1.0 + i as f64 / f64::from(days);
            let weather_factor = match weathersit {
                1 => 1.0,
                2 => 0.85,
                3 => 0.4,
                _ => 0.1,
            };
            let weekend_factor = if weekday == 0 || weekday == 6 { 0.95 } else { 1.0 };
            let base = 1200.0 + 5200.0 * temp - 1500.0 * (hum - 0.6).max(0.0) - 2000.0 * windspeed;
            let cnt = (base * growth * weather_factor * weekend_factor * rng.around(1.0, 0.1))
                .max(20.0)
                .round() as i64;

            SampleDay {
                dteday: date.format("%Y-%m-%d").to_string(),
                weekday,
                weathersit,
                temp,
                hum,
                windspeed,
                cnt,
            }
        })
        .collect()
}

fn write_csv(path: &str, rows: &[SampleDay]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[SampleDay]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("dteday", DataType::Utf8, false),
        Field::new("weekday", DataType::Int64, false),
        Field::new("weathersit", DataType::Int64, false),
        Field::new("temp", DataType::Float64, false),
        Field::new("hum", DataType::Float64, false),
        Field::new("windspeed", DataType::Float64, false),
        Field::new("cnt", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.dteday.as_str()))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.weekday))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.weathersit))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.temp))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.hum))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.windspeed))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.cnt))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SplitMix::new(2011);
    let start = NaiveDate::from_ymd_opt(2011, 1, 1).context("invalid start date")?;
    let rows = generate(start, 731, &mut rng);

    // `data/day.csv` is the dashboard's default `--data` path.
    std::fs::create_dir_all("data").context("creating data directory")?;
    write_csv("data/day.csv", &rows)?;
    write_parquet("data/day.parquet", &rows)?;

    println!(
        "Wrote {} days to data/day.csv and data/day.parquet (open the latter with --data data/day.parquet)",
        rows.len()
    );
    Ok(())
}
