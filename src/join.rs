//! Spatial join of raw point lists into the selected buffers.

use crate::classify::HubClass;
use crate::select::SelectedBuffer;
use crate::spatial::haversine_distance;
use crate::types::Site;
use geo::Point;
use serde::{Deserialize, Serialize};

/// Membership summary of one selected buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinRecord {
    /// Identifier of the buffer's hub.
    pub hub_id: String,
    /// Density class of the hub.
    pub class: HubClass,
    /// Buffer radius in kilometers.
    pub radius_km: f64,
    /// Identifiers of satellites inside the buffer, in input order.
    pub satellites_inside: Vec<String>,
    /// Identifiers of institutions inside the buffer, in input order.
    pub institutions_inside: Vec<String>,
    /// Cardinality of `satellites_inside`.
    pub satellite_count: usize,
    /// Cardinality of `institutions_inside`.
    pub institution_count: usize,
}

/// Build one [`JoinRecord`] per selected buffer, in selection order.
///
/// Membership is recomputed from the raw lists by direct distance test
/// (distance ≤ the buffer's stored radius) rather than reusing the coverage
/// index's cached sets, so the institution list — which the index never saw
/// — joins by the same rule. An empty institution list is fine.
pub fn spatial_join(
    buffers: &[SelectedBuffer],
    hubs: &[Site],
    satellites: &[Site],
    institutions: &[Site],
) -> Vec<JoinRecord> {
    buffers
        .iter()
        .map(|buffer| {
            let center = Point::new(buffer.lng, buffer.lat);
            let satellites_inside = ids_within(&center, buffer.radius_m, satellites);
            let institutions_inside = ids_within(&center, buffer.radius_m, institutions);

            let hub_id = hubs
                .get(buffer.hub)
                .map(|hub| hub.id.clone())
                .unwrap_or_default();

            JoinRecord {
                hub_id,
                class: buffer.class,
                radius_km: buffer.radius_m / 1000.0,
                satellite_count: satellites_inside.len(),
                institution_count: institutions_inside.len(),
                satellites_inside,
                institutions_inside,
            }
        })
        .collect()
}

fn ids_within(center: &Point, radius_meters: f64, sites: &[Site]) -> Vec<String> {
    sites
        .iter()
        .filter(|site| haversine_distance(center, &site.point()) <= radius_meters)
        .map(|site| site.id.clone())
        .collect()
}
