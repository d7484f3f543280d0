/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  bundled iris.csv / .csv / .json / .parquet      (export writes the same formats back)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (validated)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Schema + Vec<Record>, label order
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  selected labels → record indices
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;

pub use model::{Dataset, Record, Schema};
