/// Data layer: core types, loading, and the filter/indicator pipeline.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SurveyTable, rename columns, memo cache
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ SurveyTable │  Vec<SurveyRow>, sorted distinct selector values
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  (State, Survey, Area) subset → indicators, comparison
///   └──────────┘
/// ```
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;
