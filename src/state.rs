use std::path::Path;

use anyhow::{Context, Result};
use pub_atlas::config::{AuthoritySelection, MaxMiles, RankingSize, ViewOptions};
use pub_atlas::data::aggregate::{authority_chart_counts, rank_postcode_prefixes};
use pub_atlas::data::distance::{filter_by_distance, with_distances, DistanceMatches};
use pub_atlas::data::filter::filter_by_value;
use pub_atlas::data::loader::load_file;
use pub_atlas::{CountMap, Dataset, RankOrder, RankedList};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Home,
    Map,
    PubCount,
    Distance,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Map, Page::PubCount, Page::Distance];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Map => "Map",
            Page::PubCount => "Pub Count",
            Page::Distance => "Distance to London Bridge",
        }
    }
}

/// What the Pub Count page groups by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CountView {
    #[default]
    City,
    Postcode,
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// Everything the pages draw, recomputed from the dataset and the current
/// [`ViewOptions`] after each control change.
#[derive(Debug, Clone)]
pub struct Views {
    pub map_pubs: Dataset,
    pub authority_counts: CountMap,
    pub postcode_ranking: RankedList,
    pub nearby: DistanceMatches,
}

impl Views {
    fn compute(dataset: &Dataset, options: &ViewOptions) -> Self {
        let map_pubs = options
            .map_authority
            .as_deref()
            .map(|a| filter_by_value(dataset, a))
            .unwrap_or_default();
        let nearby = filter_by_distance(
            &with_distances(dataset, pub_atlas::config::LONDON_BRIDGE),
            options.max_miles.as_f64(),
        );
        Views {
            map_pubs,
            authority_counts: authority_chart_counts(dataset, &options.authorities.to_set()),
            postcode_ranking: rank_postcode_prefixes(
                dataset,
                options.ranking_size.get(),
                options.ranking_order,
            ),
            nearby,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file loads).
    pub dataset: Option<Dataset>,

    /// Sorted authority names offered by the pickers.
    pub authorities: Vec<String>,

    pub page: Page,
    pub count_view: CountView,

    /// Control values feeding the next recomputation.
    pub options: ViewOptions,

    /// Output of the last recomputation.
    pub views: Option<Views>,

    /// Colour per authority for bars and map points.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load `path`, replacing any current dataset. On failure the previous
    /// dataset stays and the error is shown in the status line.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path).with_context(|| format!("loading {}", path.display())) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and reset the controls.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.authorities = dataset.authorities();
        self.color_map = Some(ColorMap::new(&self.authorities));
        self.options = ViewOptions {
            map_authority: self.authorities.first().cloned(),
            ..ViewOptions::default()
        };
        self.dataset = Some(dataset);
        self.status_message = None;
        self.recompute();
    }

    /// Rebuild every view from the dataset and current options.
    pub fn recompute(&mut self) {
        self.views = self
            .dataset
            .as_ref()
            .map(|ds| Views::compute(ds, &self.options));
    }

    pub fn set_map_authority(&mut self, authority: String) {
        self.options.map_authority = Some(authority);
        self.recompute();
    }

    /// Toggle one authority in the multi-selection.
    pub fn toggle_authority(&mut self, authority: &str) {
        self.apply(|opts| opts.authorities.toggle(authority));
    }

    pub fn clear_authorities(&mut self) {
        self.options.authorities = AuthoritySelection::default();
        self.recompute();
    }

    pub fn set_ranking_size(&mut self, k: usize) {
        self.apply(|opts| {
            opts.ranking_size = RankingSize::new(k)?;
            Ok(())
        });
    }

    pub fn set_least_common(&mut self, least: bool) {
        self.options.ranking_order = RankOrder::from_least_toggle(least);
        self.recompute();
    }

    pub fn set_max_miles(&mut self, miles: u32) {
        self.apply(|opts| {
            opts.max_miles = MaxMiles::new(miles)?;
            Ok(())
        });
    }

    /// Run a validated option change, then recompute or report the error.
    fn apply<F>(&mut self, change: F)
    where
        F: FnOnce(&mut ViewOptions) -> Result<(), pub_atlas::ConfigError>,
    {
        match change(&mut self.options) {
            Ok(()) => {
                self.status_message = None;
                self.recompute();
            }
            Err(e) => {
                log::warn!("Rejected control value: {e}");
                self.status_message = Some(e.to_string());
            }
        }
    }
}
