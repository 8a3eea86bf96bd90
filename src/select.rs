//! Greedy selection of coverage buffers.
//!
//! Exact set cover is NP-hard; this selector is a greedy weighted heuristic
//! that trades optimality for a single sequential pass. Each round it scores
//! every unused hub by the number of not-yet-covered satellites its disk
//! would add, minus a penalty for overlapping disks already selected, and
//! keeps the best scorer until the coverage target is met or no hub adds
//! anything.

use crate::classify::HubClass;
use crate::coverage::{CoverageDisk, CoverageIndex};
use crate::spatial::haversine_distance;
use crate::types::Config;
use geo::Point;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// A coverage buffer chosen by the selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedBuffer {
    /// Hub index in the input list.
    pub hub: usize,
    /// Density class of the hub.
    pub class: HubClass,
    /// Buffer center latitude.
    pub lat: f64,
    /// Buffer center longitude.
    pub lng: f64,
    /// Buffer radius in meters.
    pub radius_m: f64,
    /// Total satellites inside this buffer's disk.
    pub satellites_covered: usize,
    /// Satellites that were newly covered when this buffer was picked.
    /// Not monotonic across picks: the overlap penalty can make a later
    /// pick add more new satellites than an earlier one.
    pub new_coverage: usize,
}

/// Result of a selection run.
///
/// `buffers` is in pick order, which is significant (it is the numbering
/// used for reporting) and never contains the same hub twice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Chosen buffers, in pick order.
    pub buffers: Vec<SelectedBuffer>,
    /// Distinct satellites covered by the chosen buffers.
    pub covered: usize,
    /// Coverage target the selector was aiming for.
    pub target: usize,
}

impl Selection {
    /// Whether the coverage target was reached.
    pub fn target_met(&self) -> bool {
        self.covered >= self.target
    }
}

/// Pick coverage buffers greedily until `min_coverage_target` of
/// `total_satellites` is covered or no unused hub adds coverage.
///
/// Per round, every unused hub with at least one not-yet-covered satellite
/// is scored as
///
/// ```text
/// score = new_coverage - overlap_weight * overlap_penalty
/// ```
///
/// where `overlap_penalty` accrues `(combined - d) / combined` for every
/// already-selected buffer whose center lies closer than
/// `overlap_distance_factor * combined` (`combined` being the sum of the
/// two radii, `d` the center distance). The strictly highest score wins;
/// on exactly equal scores the first candidate in hub-index order is kept.
/// That tie-break is an artifact of iteration order, not a semantic rule.
///
/// Stopping early because no candidate adds coverage is a valid outcome
/// (the caller sees it as an under-target [`Selection`]), as is an empty
/// selection when the target rounds to zero.
pub fn select_buffers(
    index: &CoverageIndex,
    total_satellites: usize,
    config: &Config,
) -> Selection {
    let target = (total_satellites as f64 * config.min_coverage_target).floor() as usize;

    let mut covered: FxHashSet<usize> = FxHashSet::default();
    let mut used: FxHashSet<usize> = FxHashSet::default();
    let mut buffers: Vec<SelectedBuffer> = Vec::new();

    while covered.len() < target {
        let mut best: Option<(&CoverageDisk, f64, usize)> = None;

        for disk in index.disks() {
            if used.contains(&disk.hub) {
                continue;
            }

            let new_coverage = disk
                .covered
                .iter()
                .filter(|s| !covered.contains(*s))
                .count();
            if new_coverage == 0 {
                continue;
            }

            let center = Point::new(disk.lng, disk.lat);
            let mut penalty = 0.0;
            for buffer in &buffers {
                let combined = disk.radius_m + buffer.radius_m;
                let d = haversine_distance(&center, &Point::new(buffer.lng, buffer.lat));
                if d < config.overlap_distance_factor * combined {
                    penalty += (combined - d) / combined;
                }
            }

            let score = new_coverage as f64 - config.overlap_weight * penalty;
            // Strictly-greater keeps the first candidate on equal scores.
            let improves = match best {
                Some((_, best_score, _)) => score > best_score,
                None => true,
            };
            if improves {
                best = Some((disk, score, new_coverage));
            }
        }

        let Some((disk, score, new_coverage)) = best else {
            log::warn!(
                "No remaining hub adds coverage; stopping at {}/{} satellites",
                covered.len(),
                target
            );
            break;
        };

        used.insert(disk.hub);
        covered.extend(disk.covered.iter().copied());

        log::debug!(
            "round {}: hub {} scored {:.3}, +{} satellites ({} covered)",
            buffers.len() + 1,
            disk.hub,
            score,
            new_coverage,
            covered.len()
        );

        buffers.push(SelectedBuffer {
            hub: disk.hub,
            class: disk.class,
            lat: disk.lat,
            lng: disk.lng,
            radius_m: disk.radius_m,
            satellites_covered: disk.covered.len(),
            new_coverage,
        });
    }

    Selection {
        buffers,
        covered: covered.len(),
        target,
    }
}
