use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use thiserror::Error;

use crate::data::aggregate::RankOrder;
use crate::data::model::GeoPoint;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Origin for every distance computation.
pub const LONDON_BRIDGE: GeoPoint = GeoPoint::new(51.507924, -0.087782);

/// Earth radius used by the haversine formula.
pub const EARTH_RADIUS_MILES: f64 = 3956.0;

/// Characters of a postcode used as its grouping key.
pub const POSTCODE_PREFIX_LEN: usize = 3;

pub const RANKING_SIZE_RANGE: RangeInclusive<usize> = 3..=10;
pub const MAX_MILES_RANGE: RangeInclusive<u32> = 0..=10;
pub const DEFAULT_MAX_MILES: u32 = 2;
pub const MAX_AUTHORITY_SELECTION: usize = 5;

/// File opened at start-up when no path is given on the command line.
pub const DEFAULT_DATA_FILE: &str = "open_pubs_10000_sample.csv";

/// Placeholder bars for the authority chart when nothing is selected.
pub const AUTHORITY_FALLBACK: [(&str, usize); 3] =
    [("City of London", 41), ("Oxford", 19), ("Manchester", 60)];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ranking size {0} is outside {min}..={max}", min = RANKING_SIZE_RANGE.start(), max = RANKING_SIZE_RANGE.end())]
    RankingSize(usize),
    #[error("distance {0} miles is outside {min}..={max}", min = MAX_MILES_RANGE.start(), max = MAX_MILES_RANGE.end())]
    MaxMiles(u32),
    #[error("at most {max} authorities can be selected, got {0}", max = MAX_AUTHORITY_SELECTION)]
    TooManyAuthorities(usize),
}

// ---------------------------------------------------------------------------
// Validated control values
// ---------------------------------------------------------------------------

/// How many postcode prefixes to rank, always within [`RANKING_SIZE_RANGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingSize(usize);

impl RankingSize {
    pub fn new(k: usize) -> Result<Self, ConfigError> {
        if RANKING_SIZE_RANGE.contains(&k) {
            Ok(Self(k))
        } else {
            Err(ConfigError::RankingSize(k))
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for RankingSize {
    fn default() -> Self {
        Self(*RANKING_SIZE_RANGE.start())
    }
}

/// Distance threshold in whole miles, always within [`MAX_MILES_RANGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxMiles(u32);

impl MaxMiles {
    pub fn new(miles: u32) -> Result<Self, ConfigError> {
        if MAX_MILES_RANGE.contains(&miles) {
            Ok(Self(miles))
        } else {
            Err(ConfigError::MaxMiles(miles))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl Default for MaxMiles {
    fn default() -> Self {
        Self(DEFAULT_MAX_MILES)
    }
}

/// Up to [`MAX_AUTHORITY_SELECTION`] authority names, in the order they
/// were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthoritySelection(Vec<String>);

impl AuthoritySelection {
    /// Duplicates collapse onto their first occurrence.
    pub fn new<I, S>(authorities: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut picked: Vec<String> = Vec::new();
        for authority in authorities.into_iter().map(Into::into) {
            if !picked.contains(&authority) {
                picked.push(authority);
            }
        }
        if picked.len() > MAX_AUTHORITY_SELECTION {
            return Err(ConfigError::TooManyAuthorities(picked.len()));
        }
        Ok(Self(picked))
    }

    /// Add `authority` at the end, or remove it if already picked.
    /// Adding beyond the cap is refused.
    pub fn toggle(&mut self, authority: &str) -> Result<(), ConfigError> {
        if let Some(pos) = self.0.iter().position(|a| a == authority) {
            self.0.remove(pos);
            return Ok(());
        }
        if self.0.len() >= MAX_AUTHORITY_SELECTION {
            return Err(ConfigError::TooManyAuthorities(self.0.len() + 1));
        }
        self.0.push(authority.to_string());
        Ok(())
    }

    pub fn contains(&self, authority: &str) -> bool {
        self.0.iter().any(|a| a == authority)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX_AUTHORITY_SELECTION
    }

    /// Picked names in pick order.
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// The selection as a set, for membership filtering.
    pub fn to_set(&self) -> BTreeSet<String> {
        self.0.iter().cloned().collect()
    }

    /// Caption fragment listing the chosen authorities in pick order,
    /// e.g. ", Oxford, Camden". Names the placeholder authorities when the
    /// selection is empty.
    pub fn caption(&self) -> String {
        let names: Vec<&str> = if self.0.is_empty() {
            AUTHORITY_FALLBACK.iter().map(|(name, _)| *name).collect()
        } else {
            self.0.iter().map(String::as_str).collect()
        };
        names.iter().map(|n| format!(", {n}")).collect()
    }
}

// ---------------------------------------------------------------------------
// ViewOptions – everything the controls feed into one recomputation
// ---------------------------------------------------------------------------

/// Control values for one pass over the dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewOptions {
    pub authorities: AuthoritySelection,
    /// Authority shown on the map, if one has been picked.
    pub map_authority: Option<String>,
    pub ranking_size: RankingSize,
    pub ranking_order: RankOrder,
    pub max_miles: MaxMiles,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(2, false)]
    #[case(3, true)]
    #[case(10, true)]
    #[case(11, false)]
    fn ranking_size_bounds(#[case] k: usize, #[case] ok: bool) {
        assert_eq!(RankingSize::new(k).is_ok(), ok);
    }

    #[rstest]
    #[case(0, true)]
    #[case(10, true)]
    #[case(11, false)]
    fn max_miles_bounds(#[case] miles: u32, #[case] ok: bool) {
        assert_eq!(MaxMiles::new(miles).is_ok(), ok);
    }

    #[rstest]
    fn defaults_match_controls() {
        let opts = ViewOptions::default();
        assert_eq!(opts.max_miles.get(), 2);
        assert_eq!(opts.ranking_size.get(), 3);
        assert_eq!(opts.ranking_order, RankOrder::Top);
        assert!(opts.authorities.is_empty());
    }

    #[rstest]
    fn selection_is_capped_at_five() {
        let err = AuthoritySelection::new(["A", "B", "C", "D", "E", "F"])
            .expect_err("six is too many");
        assert_eq!(err, ConfigError::TooManyAuthorities(6));

        let mut sel = AuthoritySelection::new(["A", "B", "C", "D", "E"]).expect("five is fine");
        assert!(sel.is_full());
        assert!(sel.toggle("F").is_err());
        sel.toggle("A").expect("removing is always allowed");
        sel.toggle("F").expect("room again after removal");
        assert!(sel.contains("F"));
        assert!(!sel.contains("A"));
    }

    #[rstest]
    fn caption_lists_selection_or_placeholders() {
        assert_eq!(
            AuthoritySelection::default().caption(),
            ", City of London, Oxford, Manchester"
        );
        let sel = AuthoritySelection::new(["Oxford", "Camden"]).expect("valid");
        assert_eq!(sel.caption(), ", Oxford, Camden");
    }

    #[rstest]
    fn toggling_keeps_pick_order() {
        let mut sel = AuthoritySelection::default();
        for authority in ["Southwark", "Camden", "Oxford", "Camden", "Camden"] {
            sel.toggle(authority).expect("under the cap");
        }

        assert_eq!(sel.names(), ["Southwark", "Oxford", "Camden"]);
        assert_eq!(sel.caption(), ", Southwark, Oxford, Camden");
        let set: Vec<String> = sel.to_set().into_iter().collect();
        assert_eq!(set, ["Camden", "Oxford", "Southwark"]);
    }

    #[rstest]
    fn duplicates_collapse_on_construction() {
        let sel = AuthoritySelection::new(["Oxford", "Oxford", "Leeds"]).expect("two distinct");
        assert_eq!(sel.names(), ["Oxford", "Leeds"]);
    }

    #[rstest]
    fn error_messages_name_the_range() {
        assert_eq!(
            ConfigError::RankingSize(12).to_string(),
            "ranking size 12 is outside 3..=10"
        );
    }
}
