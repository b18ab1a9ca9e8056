/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///   sales .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SalesDataset (cached per path)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ SalesDataset │  Vec<SalesRecord>, unique-value indices
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply FilterSpec → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐      ┌──────────┐
///   │ pipeline  │      │  export   │
///   │ KPIs +    │      │ filtered  │
///   │ tables    │      │ rows → CSV│
///   └──────────┘      └──────────┘
/// ```
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
