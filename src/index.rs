//! R-tree index over the satellite list for radius queries.
//!
//! The coverage builder asks, once per hub, which satellites fall inside the
//! hub's disk. The index answers with a bounding-box prefilter followed by
//! the exact haversine test, so results are identical to scanning the whole
//! satellite list.

use crate::spatial::{haversine_distance, radius_envelope};
use crate::types::Site;
use geo::Point;
use rstar::{AABB, Point as RstarPoint, RTree};

/// A satellite position wrapper for use with the R-tree.
///
/// Carries the satellite's index in the input list so query results can be
/// mapped back to the caller's arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedSite {
    /// X coordinate (longitude)
    pub x: f64,
    /// Y coordinate (latitude)
    pub y: f64,
    /// Position of the satellite in the input list
    pub idx: usize,
}

impl RstarPoint for IndexedSite {
    type Scalar = f64;
    const DIMENSIONS: usize = 2;

    fn generate(mut generator: impl FnMut(usize) -> Self::Scalar) -> Self {
        Self {
            x: generator(0),
            y: generator(1),
            idx: usize::MAX,
        }
    }

    fn nth(&self, index: usize) -> Self::Scalar {
        match index {
            0 => self.x,
            1 => self.y,
            _ => unreachable!(),
        }
    }

    fn nth_mut(&mut self, index: usize) -> &mut Self::Scalar {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => unreachable!(),
        }
    }
}

/// Read-only spatial index over a satellite list.
pub struct SatelliteIndex {
    tree: RTree<IndexedSite>,
    len: usize,
}

impl SatelliteIndex {
    /// Bulk-load an index from the satellite list. Indices in query results
    /// refer to positions in this list.
    pub fn new(satellites: &[Site]) -> Self {
        let points: Vec<IndexedSite> = satellites
            .iter()
            .enumerate()
            .map(|(idx, site)| IndexedSite {
                x: site.lng,
                y: site.lat,
                idx,
            })
            .collect();

        Self {
            tree: RTree::bulk_load(points),
            len: satellites.len(),
        }
    }

    /// Number of indexed satellites.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Indices of all satellites within `radius_meters` of `center`
    /// (boundary inclusive), ascending.
    pub fn within_radius(&self, center: &Point, radius_meters: f64) -> Vec<usize> {
        if !center.x().is_finite() || !center.y().is_finite() || !radius_meters.is_finite() {
            log::warn!("Rejecting radius query with non-finite parameters");
            return Vec::new();
        }
        if radius_meters < 0.0 {
            return Vec::new();
        }

        let envelope = radius_envelope(center, radius_meters);
        let aabb = AABB::from_corners(
            IndexedSite {
                x: envelope.min().x,
                y: envelope.min().y,
                idx: usize::MAX,
            },
            IndexedSite {
                x: envelope.max().x,
                y: envelope.max().y,
                idx: usize::MAX,
            },
        );

        let mut hits: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&aabb)
            .filter(|site| {
                let candidate = Point::new(site.x, site.y);
                haversine_distance(center, &candidate) <= radius_meters
            })
            .map(|site| site.idx)
            .collect();

        hits.sort_unstable();
        hits
    }

    /// Count of satellites within `radius_meters` of `center`.
    pub fn count_within_radius(&self, center: &Point, radius_meters: f64) -> usize {
        self.within_radius(center, radius_meters).len()
    }
}
