//! Greedy geographic coverage planning over hub-and-satellite point sets.
//!
//! Hubs are classified urban or rural by local density, a greedy selector
//! picks the fewest coverage disks that reach a target fraction of the
//! satellites while penalizing redundant overlap, and a spatial join reports
//! which satellites and institutions each chosen disk contains.
//!
//! ```rust
//! use coverplan::{Planner, Site};
//!
//! let hubs = vec![
//!     Site::new("hub-a", 0.0, 0.0),
//!     Site::new("hub-b", 0.0, 0.01),
//! ];
//! let satellites = vec![
//!     Site::new("sat-1", 0.0, 0.002),
//!     Site::new("sat-2", 0.0, 0.008),
//! ];
//!
//! let outcome = Planner::with_defaults().run(&hubs, &satellites, &[])?;
//! assert!(outcome.selection.target_met());
//! # Ok::<(), coverplan::CoverplanError>(())
//! ```

pub mod classify;
pub mod coverage;
pub mod error;
pub mod index;
pub mod join;
pub mod plan;
pub mod select;
pub mod spatial;
pub mod stats;
pub mod types;

pub use error::{CoverplanError, Result};

pub use plan::{PlanOutcome, Planner};

pub use classify::{Classification, HubClass, classify};
pub use coverage::{CoverageDisk, CoverageIndex, build_coverage};
pub use index::SatelliteIndex;
pub use join::{JoinRecord, spatial_join};
pub use select::{SelectedBuffer, Selection, select_buffers};
pub use stats::{PlanStats, summarize};

pub use spatial::{EARTH_RADIUS_METERS, haversine_distance, validate_site};

pub use types::{Config, PlanWarning, Site};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{CoverplanError, Planner, Result};

    pub use crate::{Config, PlanWarning, Site};

    pub use crate::{Classification, HubClass, classify};

    pub use crate::{CoverageIndex, build_coverage};

    pub use crate::{SelectedBuffer, Selection, select_buffers};

    pub use crate::{JoinRecord, spatial_join};

    pub use crate::{PlanStats, summarize};

    pub use crate::spatial::haversine_distance;
}
