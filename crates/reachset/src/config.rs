//! Analysis configuration.
//!
//! Read once (typically from JSON) and validated before any step runs; the
//! analysis never mutates it. Every section has defaults, so a document only
//! needs to name the values it changes.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::geom2::Rect;
use crate::graph::RegionProposition;

/// Dynamic bounds per axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    pub v_lon_min: f64,
    pub v_lon_max: f64,
    pub v_lat_min: f64,
    pub v_lat_max: f64,
    pub a_lon_min: f64,
    pub a_lon_max: f64,
    pub a_lat_min: f64,
    pub a_lat_max: f64,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            v_lon_min: 0.0,
            v_lon_max: 20.0,
            v_lat_min: -4.0,
            v_lat_max: 4.0,
            a_lon_min: -6.0,
            a_lon_max: 6.0,
            a_lat_min: -2.0,
            a_lat_max: 2.0,
        }
    }
}

/// Time discretization and initial state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    pub dt: f64,
    pub step_start: usize,
    pub steps_computation: usize,
    pub p_lon_initial: f64,
    pub p_lat_initial: f64,
    pub v_lon_initial: f64,
    pub v_lat_initial: f64,
    pub uncertainty_p_lon: f64,
    pub uncertainty_p_lat: f64,
    pub uncertainty_v_lon: f64,
    pub uncertainty_v_lat: f64,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            dt: 0.1,
            step_start: 0,
            steps_computation: 10,
            p_lon_initial: 0.0,
            p_lat_initial: 0.0,
            v_lon_initial: 10.0,
            v_lat_initial: 0.0,
            uncertainty_p_lon: 0.01,
            uncertainty_p_lat: 0.01,
            uncertainty_v_lon: 0.01,
            uncertainty_v_lat: 0.01,
        }
    }
}

/// How nodes are annotated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputationMode {
    #[default]
    Continuous,
    Semantic,
}

/// Pipeline parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReachableSetConfig {
    pub mode: ComputationMode,
    /// Grid of the first repartition (after projection).
    pub size_grid: f64,
    /// Grid of the second repartition (after collision splitting).
    pub size_grid_2nd: f64,
    pub radius_terminal_split: f64,
    /// Worker count; `0` lets the pool decide.
    pub num_threads: usize,
    pub prune_nodes_not_reaching_final_step: bool,
}

impl Default for ReachableSetConfig {
    fn default() -> Self {
        Self {
            mode: ComputationMode::Continuous,
            size_grid: 0.2,
            size_grid_2nd: 0.1,
            radius_terminal_split: 0.5,
            num_threads: 4,
            prune_nodes_not_reaching_final_step: false,
        }
    }
}

/// Propositions tracked in semantic mode.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SemanticConfig {
    pub propositions: Vec<RegionProposition>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub vehicle: VehicleConfig,
    pub planning: PlanningConfig,
    pub reachable_set: ReachableSetConfig,
    pub semantic: SemanticConfig,
}

impl Configuration {
    /// Parse and validate a JSON document.
    pub fn from_json(text: &str) -> Result<Self, ConfigurationError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigurationError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let v = &self.vehicle;
        check_interval("v_lon", v.v_lon_min, v.v_lon_max)?;
        check_interval("v_lat", v.v_lat_min, v.v_lat_max)?;
        // the zero-state polygon needs a spread of inputs
        check_open_interval("a_lon", v.a_lon_min, v.a_lon_max)?;
        check_open_interval("a_lat", v.a_lat_min, v.a_lat_max)?;

        let p = &self.planning;
        check_positive("dt", p.dt)?;
        check_non_negative("uncertainty_p_lon", p.uncertainty_p_lon)?;
        check_non_negative("uncertainty_p_lat", p.uncertainty_p_lat)?;
        check_non_negative("uncertainty_v_lon", p.uncertainty_v_lon)?;
        check_non_negative("uncertainty_v_lat", p.uncertainty_v_lat)?;
        if p.steps_computation == 0 {
            return Err(ConfigurationError::InvalidStepRange {
                start: p.step_start,
                end: p.step_start,
            });
        }

        let r = &self.reachable_set;
        check_positive("size_grid", r.size_grid)?;
        check_positive("size_grid_2nd", r.size_grid_2nd)?;
        check_positive("radius_terminal_split", r.radius_terminal_split)?;
        Ok(())
    }

    /// Last step of the analysis.
    #[inline]
    pub fn step_end(&self) -> usize {
        self.planning.step_start + self.planning.steps_computation
    }

    /// Initial position ± position uncertainty.
    pub fn initial_position_rectangle(&self) -> Rect {
        let p = &self.planning;
        Rect::new(
            p.p_lon_initial - p.uncertainty_p_lon,
            p.p_lat_initial - p.uncertainty_p_lat,
            p.p_lon_initial + p.uncertainty_p_lon,
            p.p_lat_initial + p.uncertainty_p_lat,
        )
    }

    /// `(lon, lat)` boxes `[p ± δp] × [v ± δv]` of the initial state.
    pub fn initial_polygon_bounds(&self) -> (Rect, Rect) {
        let p = &self.planning;
        (
            Rect::new(
                p.p_lon_initial - p.uncertainty_p_lon,
                p.v_lon_initial - p.uncertainty_v_lon,
                p.p_lon_initial + p.uncertainty_p_lon,
                p.v_lon_initial + p.uncertainty_v_lon,
            ),
            Rect::new(
                p.p_lat_initial - p.uncertainty_p_lat,
                p.v_lat_initial - p.uncertainty_v_lat,
                p.p_lat_initial + p.uncertainty_p_lat,
                p.v_lat_initial + p.uncertainty_v_lat,
            ),
        )
    }
}

fn check_interval(axis: &'static str, min: f64, max: f64) -> Result<(), ConfigurationError> {
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidBounds { axis, min, max })
    }
}

fn check_open_interval(axis: &'static str, min: f64, max: f64) -> Result<(), ConfigurationError> {
    if min.is_finite() && max.is_finite() && min < max {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidBounds { axis, min, max })
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::NonPositive { name, value })
    }
}

fn check_non_negative(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::NonPositive { name, value })
    }
}
