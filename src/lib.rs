//! Core of the pub explorer: loading, authority filtering, counting and
//! distance computation over an immutable [`data::model::Dataset`].
//!
//! Nothing in here touches the UI. The `pub-atlas` binary binds egui
//! controls to these functions and renders what they return.

pub mod config;
pub mod data;

pub use config::{AuthoritySelection, ConfigError, MaxMiles, RankingSize, ViewOptions};
pub use data::aggregate::{CountMap, RankOrder, RankedList};
pub use data::loader::{load_file, LoadError};
pub use data::model::{Dataset, DistanceRecord, GeoPoint, PubRecord};
