//! Data layer: core types, loading, filtering and summaries.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Dataset (memoized by DatasetStore)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ classify  │  numeric / categorical partition
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  optional (column, value) → View (row indices)
//!   └──────────┘
//!        │
//!        ├──────────────┐
//!        ▼              ▼
//!   ┌──────────┐   ┌──────────┐
//!   │ summary   │   │  chart    │  chart-ready series
//!   └──────────┘   └──────────┘
//! ```

pub mod chart;
pub mod classify;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
