use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// GeoPoint – a latitude/longitude pair in decimal degrees
// ---------------------------------------------------------------------------

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

// ---------------------------------------------------------------------------
// PubRecord – one cleaned row of the source CSV
// ---------------------------------------------------------------------------

/// A single pub (one row of the cleaned dataset).
///
/// `latitude` and `longitude` are always finite; the loader drops any row
/// for which either fails to parse.
#[derive(Debug, Clone, PartialEq)]
pub struct PubRecord {
    /// Food Standards Agency identifier, kept verbatim.
    pub id: String,
    pub name: String,
    pub address: String,
    pub postcode: String,
    /// British National Grid easting. Carried through, never used.
    pub easting: Option<f64>,
    /// British National Grid northing. Carried through, never used.
    pub northing: Option<f64>,
    pub latitude: f64,
    pub longitude: f64,
    /// Local authority the pub belongs to.
    pub authority: String,
}

impl PubRecord {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Text shown when hovering a pub on the map.
    pub fn label(&self) -> String {
        format!("{}\n{}", self.name, self.address)
    }
}

// ---------------------------------------------------------------------------
// Dataset – an ordered, read-only collection of records
// ---------------------------------------------------------------------------

/// The cleaned dataset, or any subset derived from it.
///
/// Records are only reachable through shared slices, so a derived
/// dataset can never be used to edit the one it came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<PubRecord>,
}

impl Dataset {
    pub fn from_records(records: Vec<PubRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PubRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PubRecord> {
        self.records.iter()
    }

    /// Number of pubs.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted, de-duplicated authority names (what the pickers offer).
    pub fn authorities(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.authority.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    /// Mean position of all records, used to centre the map.
    /// `None` when the dataset is empty.
    pub fn centroid(&self) -> Option<GeoPoint> {
        if self.records.is_empty() {
            return None;
        }
        let n = self.records.len() as f64;
        let (lat, lon) = self
            .records
            .iter()
            .fold((0.0, 0.0), |(lat, lon), r| (lat + r.latitude, lon + r.longitude));
        Some(GeoPoint::new(lat / n, lon / n))
    }
}

impl FromIterator<PubRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = PubRecord>>(iter: I) -> Self {
        Self::from_records(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a PubRecord;
    type IntoIter = std::slice::Iter<'a, PubRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ---------------------------------------------------------------------------
// DistanceRecord – a record plus its distance from the reference point
// ---------------------------------------------------------------------------

/// A pub together with its great-circle distance (miles) from the
/// reference point it was computed against.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceRecord {
    pub record: PubRecord,
    pub distance: f64,
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::PubRecord;

    /// Build a record with only the fields the core looks at filled in.
    pub fn pub_at(name: &str, authority: &str, postcode: &str, lat: f64, lon: f64) -> PubRecord {
        PubRecord {
            id: format!("id-{name}"),
            name: name.to_owned(),
            address: format!("1 {name} Street"),
            postcode: postcode.to_owned(),
            easting: None,
            northing: None,
            latitude: lat,
            longitude: lon,
            authority: authority.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::test_support::pub_at;
    use super::*;

    #[rstest]
    fn authorities_are_sorted_and_unique() {
        let ds: Dataset = [
            pub_at("a", "Oxford", "OX1 1AA", 51.75, -1.25),
            pub_at("b", "Camden", "NW1 1AA", 51.53, -0.14),
            pub_at("c", "Oxford", "OX2 1AA", 51.76, -1.26),
        ]
        .into_iter()
        .collect();

        assert_eq!(ds.authorities(), vec!["Camden", "Oxford"]);
    }

    #[rstest]
    fn centroid_is_mean_position() {
        let ds: Dataset = [
            pub_at("a", "X", "", 50.0, -1.0),
            pub_at("b", "X", "", 52.0, -3.0),
        ]
        .into_iter()
        .collect();

        let c = ds.centroid().expect("non-empty dataset has a centroid");
        assert!((c.latitude - 51.0).abs() < 1e-12);
        assert!((c.longitude + 2.0).abs() < 1e-12);
    }

    #[rstest]
    fn empty_dataset_has_no_centroid() {
        assert_eq!(Dataset::default().centroid(), None);
    }

    #[rstest]
    fn label_joins_name_and_address() {
        let r = pub_at("Crown", "X", "", 0.0, 0.0);
        assert_eq!(r.label(), "Crown\n1 Crown Street");
    }
}
