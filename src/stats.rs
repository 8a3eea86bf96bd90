//! Summary statistics over a finished pipeline run.

use crate::classify::Classification;
use crate::join::JoinRecord;
use crate::select::Selection;
use serde::{Deserialize, Serialize};

/// Plan statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanStats {
    /// Number of hubs supplied.
    pub total_hubs: usize,
    /// Hubs classified urban.
    pub urban_hubs: usize,
    /// Hubs classified rural.
    pub rural_hubs: usize,
    /// Buffers chosen by the selector.
    pub selected_buffers: usize,
    /// Hub reduction achieved by the selection, in percent. Zero when no
    /// buffers were selected.
    pub reduction_pct: f64,
    /// Number of satellites supplied.
    pub total_satellites: usize,
    /// Distinct satellites covered by the selection.
    pub covered_satellites: usize,
    /// Satellites the selector was required to cover.
    pub target_satellites: usize,
    /// Fraction of all satellites covered, in percent.
    pub coverage_pct: f64,
    /// Satellite memberships summed across join records (a satellite inside
    /// two buffers counts twice).
    pub satellites_in_buffers: usize,
    /// Institution memberships summed across join records.
    pub institutions_in_buffers: usize,
}

/// Derive summary statistics from the pipeline outputs. Pure, stateless,
/// recomputed on demand.
pub fn summarize(
    total_hubs: usize,
    total_satellites: usize,
    classification: &Classification,
    selection: &Selection,
    records: &[JoinRecord],
) -> PlanStats {
    let selected_buffers = selection.buffers.len();

    let reduction_pct = if selected_buffers == 0 || total_hubs == 0 {
        0.0
    } else {
        (1.0 - selected_buffers as f64 / total_hubs as f64) * 100.0
    };

    let coverage_pct = if total_satellites == 0 {
        0.0
    } else {
        selection.covered as f64 / total_satellites as f64 * 100.0
    };

    PlanStats {
        total_hubs,
        urban_hubs: classification.urban_count(),
        rural_hubs: classification.rural_count(),
        selected_buffers,
        reduction_pct,
        total_satellites,
        covered_satellites: selection.covered,
        target_satellites: selection.target,
        coverage_pct,
        satellites_in_buffers: records.iter().map(|r| r.satellite_count).sum(),
        institutions_in_buffers: records.iter().map(|r| r.institution_count).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::HubClass;
    use crate::select::SelectedBuffer;

    fn buffer(hub: usize) -> SelectedBuffer {
        SelectedBuffer {
            hub,
            class: HubClass::Rural,
            lat: 0.0,
            lng: 0.0,
            radius_m: 7500.0,
            satellites_covered: 0,
            new_coverage: 0,
        }
    }

    fn record(satellites: usize, institutions: usize) -> JoinRecord {
        JoinRecord {
            hub_id: "h".to_string(),
            class: HubClass::Rural,
            radius_km: 7.5,
            satellites_inside: (0..satellites).map(|i| format!("s{}", i)).collect(),
            institutions_inside: (0..institutions).map(|i| format!("i{}", i)).collect(),
            satellite_count: satellites,
            institution_count: institutions,
        }
    }

    #[test]
    fn test_summarize_counts() {
        let classification =
            Classification::from(vec![HubClass::Urban, HubClass::Rural, HubClass::Rural]);
        let selection = Selection {
            buffers: vec![buffer(0), buffer(2)],
            covered: 9,
            target: 9,
        };
        let records = vec![record(5, 1), record(4, 0)];

        let stats = summarize(3, 10, &classification, &selection, &records);

        assert_eq!(stats.total_hubs, 3);
        assert_eq!(stats.urban_hubs, 1);
        assert_eq!(stats.rural_hubs, 2);
        assert_eq!(stats.selected_buffers, 2);
        assert!((stats.reduction_pct - 33.333).abs() < 0.01);
        assert_eq!(stats.covered_satellites, 9);
        assert_eq!(stats.target_satellites, 9);
        assert!((stats.coverage_pct - 90.0).abs() < 1e-9);
        assert_eq!(stats.satellites_in_buffers, 9);
        assert_eq!(stats.institutions_in_buffers, 1);
    }

    #[test]
    fn test_summarize_empty_selection_is_all_zero_percent() {
        let stats = summarize(
            5,
            0,
            &Classification::default(),
            &Selection::default(),
            &[],
        );

        assert_eq!(stats.reduction_pct, 0.0);
        assert_eq!(stats.coverage_pct, 0.0);
        assert_eq!(stats.selected_buffers, 0);
        assert_eq!(stats.satellites_in_buffers, 0);
    }

    #[test]
    fn test_summarize_no_hubs() {
        let stats = summarize(
            0,
            3,
            &Classification::default(),
            &Selection::default(),
            &[],
        );
        assert_eq!(stats.reduction_pct, 0.0);
    }
}
