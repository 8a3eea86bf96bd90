//! The pipeline facade.
//!
//! `Planner` owns a validated configuration and runs the stages in their
//! dependency order: classify, build coverage, select, join, summarize.
//! Every stage also has a standalone public function taking its inputs as
//! explicit parameters, so callers who need a single stage cannot call it
//! out of order by accident — the data dependencies are in the signatures,
//! not in shared state.

use crate::classify::{Classification, classify};
use crate::coverage::build_coverage;
use crate::error::{CoverplanError, Result};
use crate::join::{JoinRecord, spatial_join};
use crate::select::{Selection, select_buffers};
use crate::spatial::validate_site;
use crate::stats::{PlanStats, summarize};
use crate::types::{Config, PlanWarning, Site};
use serde::Serialize;

/// Full output of one pipeline run, returned by value.
#[derive(Debug, Clone, Serialize)]
pub struct PlanOutcome {
    /// Per-hub density classes (empty when fewer than 2 hubs were supplied).
    pub classification: Classification,
    /// Chosen coverage buffers, in pick order.
    pub selection: Selection,
    /// Per-buffer membership records, in pick order.
    pub join: Vec<JoinRecord>,
    /// Summary counts and percentages.
    pub stats: PlanStats,
    /// Degraded-but-valid conditions encountered during the run.
    pub warnings: Vec<PlanWarning>,
}

/// Caller-owned coverage planning context.
///
/// Holds nothing but the configuration; all per-run state lives in the
/// [`PlanOutcome`] each call returns, so concurrent runs over different
/// inputs are fully independent.
///
/// # Examples
///
/// ```rust
/// use coverplan::{Planner, Site};
///
/// let hubs = vec![
///     Site::new("hub-a", 0.0, 0.0),
///     Site::new("hub-b", 0.0, 0.01),
/// ];
/// let satellites = vec![Site::new("sat-1", 0.0, 0.002)];
///
/// let planner = Planner::with_defaults();
/// let outcome = planner.run(&hubs, &satellites, &[])?;
///
/// assert_eq!(outcome.classification.len(), 2);
/// assert_eq!(outcome.stats.covered_satellites, 1);
/// # Ok::<(), coverplan::CoverplanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Planner {
    config: Config,
}

impl Planner {
    /// Create a planner, validating the configuration first.
    pub fn new(config: Config) -> Result<Self> {
        config.validate().map_err(CoverplanError::InvalidConfig)?;
        Ok(Self { config })
    }

    /// Create a planner with the default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// The planner's configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full pipeline over the given point lists.
    ///
    /// Institutions are optional: pass an empty slice when there are none.
    /// All coordinates are validated up front; a malformed site fails the
    /// whole run with [`CoverplanError::InvalidInput`] rather than
    /// propagating silently wrong distances.
    ///
    /// Insufficient input (fewer than 2 hubs, no satellites) and an unmet
    /// coverage target are not errors: the run completes with empty
    /// downstream results and the condition recorded in
    /// [`PlanOutcome::warnings`].
    pub fn run(
        &self,
        hubs: &[Site],
        satellites: &[Site],
        institutions: &[Site],
    ) -> Result<PlanOutcome> {
        for site in hubs.iter().chain(satellites).chain(institutions) {
            validate_site(site)?;
        }

        let mut warnings = Vec::new();
        if hubs.len() < 2 {
            warnings.push(PlanWarning::InsufficientHubs { hubs: hubs.len() });
        }
        if satellites.is_empty() {
            log::warn!("No satellites supplied, nothing to cover");
            warnings.push(PlanWarning::NoSatellites);
        }

        let classification = classify(hubs, &self.config);
        let coverage = build_coverage(hubs, satellites, &classification, &self.config);
        let selection = select_buffers(&coverage, satellites.len(), &self.config);

        if !selection.target_met() {
            warnings.push(PlanWarning::CoverageTargetUnmet {
                covered: selection.covered,
                target: selection.target,
            });
        }

        let join = spatial_join(&selection.buffers, hubs, satellites, institutions);
        let stats = summarize(
            hubs.len(),
            satellites.len(),
            &classification,
            &selection,
            &join,
        );

        Ok(PlanOutcome {
            classification,
            selection,
            join,
            stats,
            warnings,
        })
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::with_defaults()
    }
}
