//! Density classification of hubs.
//!
//! A hub is URBAN when the mean distance to its k nearest fellow hubs falls
//! below the configured threshold, RURAL otherwise. The classification drives
//! the coverage radius of every downstream stage.

use crate::spatial::haversine_distance;
use crate::types::{Config, Site};
use geo::Point;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cmp::Ordering;

/// Density class of a hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HubClass {
    Urban,
    Rural,
}

impl HubClass {
    /// Coverage radius implied by this class, in meters.
    pub fn radius_m(&self, config: &Config) -> f64 {
        match self {
            HubClass::Urban => config.urban_radius_m,
            HubClass::Rural => config.rural_radius_m,
        }
    }
}

/// Per-hub density classes, keyed by 0-based hub index.
///
/// Built once per run by [`classify`]; a changed hub list invalidates it and
/// requires a rebuild. After a successful classification every hub index
/// appears exactly once; when fewer than 2 hubs were supplied the
/// classification is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Classification {
    classes: Vec<HubClass>,
}

impl Classification {
    /// Class of the hub at `index`, if classified.
    pub fn get(&self, index: usize) -> Option<HubClass> {
        self.classes.get(index).copied()
    }

    /// Number of classified hubs.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether no hubs were classified.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Iterate classes in hub-index order.
    pub fn iter(&self) -> impl Iterator<Item = HubClass> + '_ {
        self.classes.iter().copied()
    }

    /// Number of urban hubs.
    pub fn urban_count(&self) -> usize {
        self.classes
            .iter()
            .filter(|c| **c == HubClass::Urban)
            .count()
    }

    /// Number of rural hubs.
    pub fn rural_count(&self) -> usize {
        self.classes
            .iter()
            .filter(|c| **c == HubClass::Rural)
            .count()
    }

    /// Coverage radius of the hub at `index`, in meters.
    pub fn radius_for(&self, index: usize, config: &Config) -> Option<f64> {
        self.get(index).map(|class| class.radius_m(config))
    }
}

impl From<Vec<HubClass>> for Classification {
    fn from(classes: Vec<HubClass>) -> Self {
        Self { classes }
    }
}

/// Classify every hub by local density.
///
/// For each hub, distances to all other hubs are stable-sorted ascending
/// (equal distances keep input order) and the smallest
/// `min(config.knn, hubs.len() - 1)` are averaged; the hub is URBAN when
/// the average is strictly below `config.urban_density_threshold_m`.
///
/// Fewer than 2 hubs cannot be classified (no neighbor distance exists);
/// the result is then empty and a warning is logged. O(n² log n).
///
/// # Examples
///
/// ```rust
/// use coverplan::{Config, HubClass, Site, classify};
///
/// let hubs = vec![
///     Site::new("a", 0.0, 0.0),
///     Site::new("b", 0.0, 0.01), // ~1.1 km east
/// ];
/// let config = Config::default().with_knn(1);
///
/// let classification = classify(&hubs, &config);
/// assert_eq!(classification.get(0), Some(HubClass::Urban));
/// assert_eq!(classification.get(1), Some(HubClass::Urban));
/// ```
pub fn classify(hubs: &[Site], config: &Config) -> Classification {
    if hubs.len() < 2 {
        log::warn!(
            "At least 2 hubs are required to classify by density, got {}",
            hubs.len()
        );
        return Classification::default();
    }

    let k = config.knn.clamp(1, hubs.len() - 1);
    let points: Vec<Point> = hubs.iter().map(Site::point).collect();

    let classes = points
        .iter()
        .enumerate()
        .map(|(i, center)| {
            let mut distances: SmallVec<[f64; 32]> = points
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, other)| haversine_distance(center, other))
                .collect();

            // Stable sort keeps input order on equal distances.
            distances.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

            let mean = distances.iter().take(k).sum::<f64>() / k as f64;
            if mean < config.urban_density_threshold_m {
                HubClass::Urban
            } else {
                HubClass::Rural
            }
        })
        .collect();

    Classification { classes }
}
