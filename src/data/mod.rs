/// Data layer: loading, normalisation and the immutable package table.
///
/// Architecture:
/// ```text
///   Cleaned_Package_Data_County.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  header + rows of optional cells → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ pipeline  │  timestamps → complete rows → durations → zero fill
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ PackageTable  │  Vec<PackageRecord>, read-only after this point
///   └──────────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
pub mod pipeline;
