/// Data layer: core types, synthesis, loading, filtering, and statistics.
///
/// Architecture:
/// ```text
///   synth (seeded)          .parquet / .json / .csv
///        │                          │
///        ▼                          ▼
///   ┌──────────┐              ┌──────────┐
///   │  Frame    │              │  loader   │  parse file → point rows
///   └──────────┘              └──────────┘
///        │
///   ┌────┴─────────┐
///   ▼              ▼
/// ┌──────────┐  ┌──────────┐
/// │  filter   │  │  stats    │  predicates → rows   describe → summary frame
/// └──────────┘  └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
pub mod synth;
