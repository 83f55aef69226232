/// Data layer: core types, loading, filtering, counting and distances.
///
/// Architecture:
/// ```text
///   open_pubs.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → Dataset (bad coordinates dropped)
///   └──────────┘
///        │
///        ├──────────────────────────────┐
///        ▼                              ▼
///   ┌──────────┐                  ┌───────────┐
///   │  filter   │  by authority   │ distance   │  haversine to reference
///   └──────────┘                  └───────────┘
///        │                              │
///        ▼                              ▼
///   ┌───────────┐                 threshold filter + count
///   │ aggregate  │  CountMap / RankedList
///   └───────────┘
/// ```

pub mod aggregate;
pub mod distance;
pub mod filter;
pub mod loader;
pub mod model;
