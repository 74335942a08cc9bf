use std::path::PathBuf;

use clap::Parser;

/// Launch options.
#[derive(Debug, Parser)]
#[command(name = "bike-rental-dashboard", version, about)]
pub struct Args {
    /// Day table to open at startup (.csv, .json or .parquet)
    #[arg(long, env = "BIKE_DATA", default_value = "data/day.csv")]
    pub data: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_day_csv() {
        let args = Args::try_parse_from(["bike-rental-dashboard"]).unwrap();
        // BIKE_DATA may be set in the environment running the tests.
        if std::env::var_os("BIKE_DATA").is_none() {
            assert_eq!(args.data, PathBuf::from("data/day.csv"));
        }
    }

    #[test]
    fn data_flag_overrides_default() {
        let args = Args::try_parse_from(["bike-rental-dashboard", "--data", "/tmp/day.parquet"]).unwrap();
        assert_eq!(args.data, PathBuf::from("/tmp/day.parquet"));
    }
}
