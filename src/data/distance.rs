use super::model::{Dataset, DistanceRecord, GeoPoint};
use crate::config::{EARTH_RADIUS_MILES, LONDON_BRIDGE};

// ---------------------------------------------------------------------------
// Haversine
// ---------------------------------------------------------------------------

/// Great-circle distance in miles between two points given in degrees.
pub fn haversine_miles(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlon = to.longitude.to_radians() - from.longitude.to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // rounding can push `a` a hair above 1 for antipodal points
    let central_angle = 2.0 * a.sqrt().min(1.0).asin();
    central_angle * EARTH_RADIUS_MILES
}

/// Distance in miles from `(lat, lon)` to [`LONDON_BRIDGE`].
pub fn distance_to_london_bridge(lat: f64, lon: f64) -> f64 {
    haversine_miles(GeoPoint::new(lat, lon), LONDON_BRIDGE)
}

/// Distance of every pub from `reference`, in dataset order.
pub fn distances(dataset: &Dataset, reference: GeoPoint) -> Vec<f64> {
    dataset
        .iter()
        .map(|r| haversine_miles(r.location(), reference))
        .collect()
}

// ---------------------------------------------------------------------------
// Augment + threshold
// ---------------------------------------------------------------------------

/// Attach each pub's distance from `reference`. Nothing is dropped.
pub fn with_distances(dataset: &Dataset, reference: GeoPoint) -> Vec<DistanceRecord> {
    dataset
        .iter()
        .zip(distances(dataset, reference))
        .map(|(record, distance)| DistanceRecord {
            record: record.clone(),
            distance,
        })
        .collect()
}

/// Pubs within a distance threshold, plus how many there are.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatches {
    pub max_miles: f64,
    pub records: Vec<DistanceRecord>,
}

impl DistanceMatches {
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Caption shown above the results table.
    pub fn summary(&self) -> String {
        format!(
            "Total pubs within {} miles of London Bridge: {}",
            self.max_miles,
            self.count()
        )
    }
}

/// Keep records with `distance <= max_miles`.
pub fn filter_by_distance(augmented: &[DistanceRecord], max_miles: f64) -> DistanceMatches {
    let records: Vec<DistanceRecord> = augmented
        .iter()
        .filter(|r| r.distance <= max_miles)
        .cloned()
        .collect();
    log::debug!("{} of {} pubs within {max_miles} miles", records.len(), augmented.len());
    DistanceMatches { max_miles, records }
}
