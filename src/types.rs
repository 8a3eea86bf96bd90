//! Input types, configuration, and warning conditions for coverplan
//!
//! This module provides the serializable site and configuration types the
//! pipeline consumes, with minimal complexity.

use bytes::Bytes;
use geo::Point;
use serde::de::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic site: a hub, satellite, or institution.
///
/// Sites are immutable once loaded. The optional `payload` (student counts,
/// staff counts, and similar) is opaque passthrough data: it is carried on
/// the site but never read by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Caller-supplied identifier, echoed into join records.
    pub id: String,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
    /// Opaque passthrough data, ignored by the pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Bytes>,
}

impl Site {
    /// Create a site without payload.
    pub fn new(id: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            lng,
            payload: None,
        }
    }

    /// Create a site carrying opaque payload bytes.
    pub fn with_payload(
        id: impl Into<String>,
        lat: f64,
        lng: f64,
        payload: impl Into<Bytes>,
    ) -> Self {
        Self {
            id: id.into(),
            lat,
            lng,
            payload: Some(payload.into()),
        }
    }

    /// The site position as a `geo::Point` (x = longitude, y = latitude).
    pub fn point(&self) -> Point {
        Point::new(self.lng, self.lat)
    }
}

/// Pipeline configuration
///
/// This configuration is designed to be easily serializable and loadable
/// from JSON, TOML, or other formats while keeping complexity minimal.
///
/// # Example
///
/// ```rust
/// use coverplan::Config;
///
/// // Create default config
/// let config = Config::default();
///
/// // Load from JSON
/// let json = r#"{
///     "knn": 5,
///     "min_coverage_target": 0.9
/// }"#;
/// let config: Config = serde_json::from_str(json).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Number of nearest neighbors averaged by the density classifier.
    /// Clamped to the available neighbor count at classification time.
    #[serde(default = "Config::default_knn")]
    pub knn: usize,

    /// Mean k-NN distance below which a hub is classified urban, in meters.
    #[serde(default = "Config::default_urban_density_threshold_m")]
    pub urban_density_threshold_m: f64,

    /// Coverage disk radius for urban hubs, in meters.
    #[serde(default = "Config::default_urban_radius_m")]
    pub urban_radius_m: f64,

    /// Coverage disk radius for rural hubs, in meters.
    #[serde(default = "Config::default_rural_radius_m")]
    pub rural_radius_m: f64,

    /// Fraction of satellites the selector must cover before stopping.
    #[serde(default = "Config::default_min_coverage_target")]
    pub min_coverage_target: f64,

    /// Fraction of the combined radius below which two disks are
    /// considered overlapping.
    #[serde(default = "Config::default_overlap_distance_factor")]
    pub overlap_distance_factor: f64,

    /// Weight applied to the overlap penalty in the selection score.
    #[serde(default = "Config::default_overlap_weight")]
    pub overlap_weight: f64,
}

impl Config {
    const fn default_knn() -> usize {
        3
    }

    const fn default_urban_density_threshold_m() -> f64 {
        2500.0
    }

    const fn default_urban_radius_m() -> f64 {
        3500.0
    }

    const fn default_rural_radius_m() -> f64 {
        7500.0
    }

    const fn default_min_coverage_target() -> f64 {
        0.95
    }

    const fn default_overlap_distance_factor() -> f64 {
        0.7
    }

    const fn default_overlap_weight() -> f64 {
        5.0
    }

    pub fn with_knn(mut self, knn: usize) -> Self {
        self.knn = knn;
        self
    }

    pub fn with_urban_density_threshold_m(mut self, threshold: f64) -> Self {
        self.urban_density_threshold_m = threshold;
        self
    }

    pub fn with_urban_radius_m(mut self, radius: f64) -> Self {
        self.urban_radius_m = radius;
        self
    }

    pub fn with_rural_radius_m(mut self, radius: f64) -> Self {
        self.rural_radius_m = radius;
        self
    }

    pub fn with_min_coverage_target(mut self, fraction: f64) -> Self {
        self.min_coverage_target = fraction;
        self
    }

    pub fn with_overlap_distance_factor(mut self, factor: f64) -> Self {
        self.overlap_distance_factor = factor;
        self
    }

    pub fn with_overlap_weight(mut self, weight: f64) -> Self {
        self.overlap_weight = weight;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.knn == 0 {
            return Err("knn must be greater than zero".to_string());
        }

        for (name, value) in [
            ("urban_density_threshold_m", self.urban_density_threshold_m),
            ("urban_radius_m", self.urban_radius_m),
            ("rural_radius_m", self.rural_radius_m),
        ] {
            if !value.is_finite() {
                return Err(format!("{} must be finite (not NaN or infinity)", name));
            }
            if value <= 0.0 {
                return Err(format!("{} must be positive", name));
            }
        }

        if !self.min_coverage_target.is_finite()
            || self.min_coverage_target <= 0.0
            || self.min_coverage_target > 1.0
        {
            return Err("min_coverage_target must be within (0.0, 1.0]".to_string());
        }

        if !self.overlap_distance_factor.is_finite()
            || self.overlap_distance_factor <= 0.0
            || self.overlap_distance_factor > 1.0
        {
            return Err("overlap_distance_factor must be within (0.0, 1.0]".to_string());
        }

        if !self.overlap_weight.is_finite() || self.overlap_weight < 0.0 {
            return Err("overlap_weight must be finite and non-negative".to_string());
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            knn: Self::default_knn(),
            urban_density_threshold_m: Self::default_urban_density_threshold_m(),
            urban_radius_m: Self::default_urban_radius_m(),
            rural_radius_m: Self::default_rural_radius_m(),
            min_coverage_target: Self::default_min_coverage_target(),
            overlap_distance_factor: Self::default_overlap_distance_factor(),
            overlap_weight: Self::default_overlap_weight(),
        }
    }
}

/// Degraded-but-valid pipeline outcomes.
///
/// Warnings are collected on [`PlanOutcome`](crate::PlanOutcome) and mirrored
/// to the `log` facade at the point of detection; none of them aborts a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanWarning {
    /// Fewer than 2 hubs supplied: no neighbor distance can be computed, so
    /// the classification (and everything downstream) is empty.
    InsufficientHubs { hubs: usize },
    /// No satellites supplied: coverage is undefined and the selection is
    /// empty.
    NoSatellites,
    /// The greedy selector ran out of improving candidates before reaching
    /// the coverage target.
    CoverageTargetUnmet { covered: usize, target: usize },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanWarning::InsufficientHubs { hubs } => {
                write!(f, "at least 2 hubs are required to classify, got {}", hubs)
            }
            PlanWarning::NoSatellites => write!(f, "no satellites supplied, nothing to cover"),
            PlanWarning::CoverageTargetUnmet { covered, target } => write!(
                f,
                "coverage target not reached: {} of {} satellites covered",
                covered, target
            ),
        }
    }
}
