/// Data layer: core types, loading, filtering and chart aggregation.
///
/// Architecture:
/// ```text
///  .csv / .parquet (+ metadata .json)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → BenchmarkSet
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ BenchmarkSet  │  Vec<BenchmarkResult>, observed tags
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  category selections → filtered results
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  series   │  per-solver points + axis domains
///   └──────────┘
/// ```

pub mod category;
pub mod filter;
pub mod loader;
pub mod model;
pub mod series;
