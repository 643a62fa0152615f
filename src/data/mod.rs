/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, site + booster indices
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site AND payload range → ordered subset
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
