/// Data layer: core types, loading, normalization and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawLaunchRecord>   (once, at startup)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  payload text → f64, min/max → LaunchContext
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site + payload range → proportion / scatter views
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
