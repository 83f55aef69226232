use std::collections::BTreeSet;

use super::model::{Dataset, PubRecord};

// ---------------------------------------------------------------------------
// Authority filters
// ---------------------------------------------------------------------------

/// Pubs whose authority is one of `authorities`.
///
/// An empty selection means nothing is selected, so the result is empty
/// rather than the whole dataset.
pub fn filter_by_set(dataset: &Dataset, authorities: &BTreeSet<String>) -> Dataset {
    if authorities.is_empty() {
        return Dataset::default();
    }
    select(dataset, |r| authorities.contains(&r.authority))
}

/// Pubs whose authority is exactly `authority` (case-sensitive, no trimming).
pub fn filter_by_value(dataset: &Dataset, authority: &str) -> Dataset {
    select(dataset, |r| r.authority == authority)
}

/// Copy out the matching records, preserving order.
fn select<F>(dataset: &Dataset, keep: F) -> Dataset
where
    F: Fn(&PubRecord) -> bool,
{
    dataset.iter().filter(|r| keep(*r)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::data::model::test_support::pub_at;

    #[fixture]
    fn dataset() -> Dataset {
        [
            pub_at("Eagle", "Oxford", "OX1 2AB", 51.75, -1.26),
            pub_at("Lamb", "Camden", "WC1 3EE", 51.52, -0.12),
            pub_at("Turf", "Oxford", "OX1 3SU", 51.75, -1.25),
            pub_at("Star", "oxford", "OX4 1AA", 51.74, -1.23),
            pub_at("Bell", "Manchester", "M1 1AA", 53.48, -2.24),
        ]
        .into_iter()
        .collect()
    }

    fn names(ds: &Dataset) -> Vec<&str> {
        ds.iter().map(|r| r.name.as_str()).collect()
    }

    #[rstest]
    fn set_filter_keeps_exactly_members(dataset: Dataset) {
        let wanted: BTreeSet<String> = ["Oxford", "Manchester"].map(String::from).into();

        let out = filter_by_set(&dataset, &wanted);

        assert_eq!(names(&out), vec!["Eagle", "Turf", "Bell"]);
        assert!(out.iter().all(|r| wanted.contains(&r.authority)));
        let expected_len = dataset
            .iter()
            .filter(|r| wanted.contains(&r.authority))
            .count();
        assert_eq!(out.len(), expected_len);
    }

    #[rstest]
    fn empty_set_selects_nothing(dataset: Dataset) {
        assert!(filter_by_set(&dataset, &BTreeSet::new()).is_empty());
    }

    #[rstest]
    fn unknown_authority_selects_nothing(dataset: Dataset) {
        let wanted: BTreeSet<String> = ["Atlantis".to_string()].into();
        assert!(filter_by_set(&dataset, &wanted).is_empty());
    }

    #[rstest]
    #[case("Oxford", vec!["Eagle", "Turf"])]
    #[case("oxford", vec!["Star"])]
    #[case("Oxford ", vec![])]
    fn value_filter_is_exact(dataset: Dataset, #[case] authority: &str, #[case] expected: Vec<&str>) {
        assert_eq!(names(&filter_by_value(&dataset, authority)), expected);
    }

    #[rstest]
    fn filtering_leaves_source_untouched(dataset: Dataset) {
        let before = dataset.clone();
        let _ = filter_by_value(&dataset, "Camden");
        assert_eq!(dataset, before);
    }
}
