//! Coverage index: which satellites each hub's disk contains.

use crate::classify::{Classification, HubClass};
use crate::index::SatelliteIndex;
use crate::types::{Config, Site};
use serde::{Deserialize, Serialize};

/// The coverage disk of a single hub.
///
/// `covered` holds the ascending indices of satellites within `radius_m`
/// of the hub center (boundary inclusive). Disks of different hubs may
/// share satellites; the overlap is what the selector later penalizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageDisk {
    /// Hub index in the input list.
    pub hub: usize,
    /// Density class the radius was derived from.
    pub class: HubClass,
    /// Disk center latitude.
    pub lat: f64,
    /// Disk center longitude.
    pub lng: f64,
    /// Disk radius in meters.
    pub radius_m: f64,
    /// Ascending indices of satellites inside the disk.
    pub covered: Vec<usize>,
}

/// Per-hub coverage disks for one classified hub list, in hub-index order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageIndex {
    disks: Vec<CoverageDisk>,
    satellite_count: usize,
}

impl CoverageIndex {
    /// Build an index from precomputed disks. `satellite_count` is the size
    /// of the satellite list the disk memberships refer to.
    pub fn new(disks: Vec<CoverageDisk>, satellite_count: usize) -> Self {
        Self {
            disks,
            satellite_count,
        }
    }

    /// Disks in hub-index order.
    pub fn disks(&self) -> &[CoverageDisk] {
        &self.disks
    }

    /// Disk of the hub at `index`.
    pub fn get(&self, index: usize) -> Option<&CoverageDisk> {
        self.disks.get(index)
    }

    /// Number of hubs in the index.
    pub fn len(&self) -> usize {
        self.disks.len()
    }

    /// Whether the index holds no disks.
    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    /// Size of the satellite list the disks were computed against.
    pub fn satellite_count(&self) -> usize {
        self.satellite_count
    }
}

/// Compute the coverage disk of every classified hub.
///
/// The radius of each disk is the class radius from `config`
/// (urban or rural); a satellite belongs to a disk iff its haversine
/// distance to the hub center is at most that radius. Membership is a pure
/// function of hub position, radius, and the satellite list — a changed
/// list requires a rebuild.
///
/// An empty classification (fewer than 2 hubs were classified) or a
/// classification that does not match `hubs` yields an empty index.
pub fn build_coverage(
    hubs: &[Site],
    satellites: &[Site],
    classification: &Classification,
    config: &Config,
) -> CoverageIndex {
    if classification.len() != hubs.len() {
        if !hubs.is_empty() {
            log::warn!(
                "Classification covers {} hubs but {} were supplied; returning empty coverage index",
                classification.len(),
                hubs.len()
            );
        }
        return CoverageIndex::default();
    }

    let index = SatelliteIndex::new(satellites);

    let disks = hubs
        .iter()
        .zip(classification.iter())
        .enumerate()
        .map(|(hub, (site, class))| {
            let radius_m = class.radius_m(config);
            let covered = index.within_radius(&site.point(), radius_m);
            CoverageDisk {
                hub,
                class,
                lat: site.lat,
                lng: site.lng,
                radius_m,
                covered,
            }
        })
        .collect();

    CoverageIndex::new(disks, satellites.len())
}
