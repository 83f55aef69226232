use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use super::filter::filter_by_set;
use super::model::Dataset;
use crate::config::{AUTHORITY_FALLBACK, POSTCODE_PREFIX_LEN};

// ---------------------------------------------------------------------------
// CountMap – key → number of pubs
// ---------------------------------------------------------------------------

/// Occurrence counts per grouping key (authority name or postcode prefix).
///
/// Keys iterate in lexicographic order, independent of row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountMap {
    counts: BTreeMap<String, usize>,
}

impl CountMap {
    /// Group the keys and count each group.
    pub fn from_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let counts = keys.into_iter().fold(BTreeMap::new(), |mut acc, key| {
            *acc.entry(key.into()).or_insert(0) += 1;
            acc
        });
        Self { counts }
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.counts.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Replace an empty map with the given placeholder entries.
    pub fn or_fallback(self, fallback: &[(&str, usize)]) -> Self {
        if !self.is_empty() {
            return self;
        }
        Self {
            counts: fallback
                .iter()
                .map(|(k, v)| ((*k).to_string(), *v))
                .collect(),
        }
    }

    /// The `k` highest (`Top`) or lowest (`Bottom`) entries.
    ///
    /// Equal counts are ordered by key ascending in both modes, so the
    /// result never depends on input order.
    pub fn ranked(&self, k: usize, order: RankOrder) -> RankedList {
        let mut entries: Vec<(String, usize)> =
            self.counts.iter().map(|(key, n)| (key.clone(), *n)).collect();
        entries.sort_by(|a, b| order.compare(a.1, b.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(k);
        RankedList { order, entries }
    }
}

impl FromIterator<(String, usize)> for CountMap {
    fn from_iter<I: IntoIterator<Item = (String, usize)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Which end of the frequency table to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RankOrder {
    /// Most common first.
    #[default]
    Top,
    /// Least common first.
    Bottom,
}

impl RankOrder {
    /// Map the "show least common" toggle onto an order.
    pub fn from_least_toggle(least: bool) -> Self {
        if least {
            RankOrder::Bottom
        } else {
            RankOrder::Top
        }
    }

    fn compare(self, a: usize, b: usize) -> Ordering {
        match self {
            RankOrder::Top => b.cmp(&a),
            RankOrder::Bottom => a.cmp(&b),
        }
    }
}

/// An ordered `(key, count)` table cut to at most K entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedList {
    pub order: RankOrder,
    pub entries: Vec<(String, usize)>,
}

impl RankedList {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

// ---------------------------------------------------------------------------
// Grouping modes
// ---------------------------------------------------------------------------

/// Pubs per authority, counted within `filtered` only.
pub fn count_by_authority(filtered: &Dataset) -> CountMap {
    CountMap::from_keys(filtered.iter().map(|r| r.authority.as_str()))
}

/// Counts for the authority bar chart: restrict to `selection`, count, and
/// substitute the placeholder triple when nothing is left to show.
pub fn authority_chart_counts(dataset: &Dataset, selection: &BTreeSet<String>) -> CountMap {
    let counts = count_by_authority(&filter_by_set(dataset, selection));
    if counts.is_empty() {
        log::debug!("Authority chart empty, using placeholder counts");
    }
    counts.or_fallback(&AUTHORITY_FALLBACK)
}

/// First three characters of a postcode, a rough stand-in for the outward
/// code. `None` for a blank postcode.
pub fn postcode_prefix(postcode: &str) -> Option<&str> {
    if postcode.is_empty() {
        return None;
    }
    let end = postcode
        .char_indices()
        .nth(POSTCODE_PREFIX_LEN)
        .map_or(postcode.len(), |(i, _)| i);
    Some(&postcode[..end])
}

/// Pubs per postcode prefix over the whole dataset.
pub fn count_by_postcode_prefix(dataset: &Dataset) -> CountMap {
    CountMap::from_keys(dataset.iter().filter_map(|r| postcode_prefix(&r.postcode)))
}

/// Top or bottom `k` postcode prefixes.
pub fn rank_postcode_prefixes(dataset: &Dataset, k: usize, order: RankOrder) -> RankedList {
    count_by_postcode_prefix(dataset).ranked(k, order)
}
