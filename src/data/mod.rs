/// Data layer: record types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → RentalDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ RentalDataset │  Vec<DailyRecord>, sorted by date
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  start ≤ date ≤ end (or everything)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  mean rentals per weather / weekday code
///   └───────────┘
///        │
///        ▼
///   DashboardView → charts
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod view;
