//! Error taxonomy for the reachability pipeline.
//!
//! - `GeometryError`: empty or degenerate polygon results. Callers drop the
//!   affected node or cell and continue.
//! - `ConfigurationError`: invalid dynamic bounds or grid parameters. Fatal,
//!   surfaced before the first step runs.
//! - `OracleQueryError`: the collision oracle could not answer. Aborts the step.

use thiserror::Error;

/// Degenerate or empty result of a polygon operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// The operation left no point of the input.
    #[error("empty polygon")]
    Empty,

    /// The half-plane intersection is not bounded.
    #[error("unbounded half-plane intersection")]
    Unbounded,

    /// The result has (numerically) zero area.
    #[error("degenerate polygon with area {area}")]
    Degenerate {
        /// Area of the offending polygon.
        area: f64,
    },

    /// Fewer than three distinct vertices remain.
    #[error("polygon needs at least 3 distinct vertices, got {count}")]
    TooFewVertices {
        /// Number of distinct vertices found.
        count: usize,
    },
}

/// Invalid or missing configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// An interval bound pair is reversed or not finite.
    #[error("invalid bounds for {axis}: min {min} > max {max}")]
    InvalidBounds {
        /// Name of the bounded quantity (e.g. `v_lon`).
        axis: &'static str,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// A quantity that must be positive (or non-negative) is not.
    #[error("{name} must be positive, got {value}")]
    NonPositive {
        /// Name of the parameter.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The requested step range is empty or reversed.
    #[error("invalid step range {start}..={end}")]
    InvalidStepRange {
        /// First step.
        start: usize,
        /// Last step.
        end: usize,
    },

    /// The worker pool could not be created.
    #[error("thread pool: {0}")]
    ThreadPool(String),

    /// The configuration document could not be parsed.
    #[error("parse: {0}")]
    Parse(String),
}

/// Collision oracle failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OracleQueryError {
    /// The queried step lies outside the scenario horizon known to the oracle.
    #[error("step {step} is outside the oracle horizon")]
    StepOutOfHorizon {
        /// Queried step.
        step: usize,
    },

    /// The oracle is not able to answer queries.
    #[error("collision oracle unavailable: {0}")]
    Unavailable(String),
}

/// Umbrella error returned by the analysis driver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReachError {
    /// See [`GeometryError`].
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// See [`ConfigurationError`].
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// See [`OracleQueryError`].
    #[error(transparent)]
    Oracle(#[from] OracleQueryError),
}

/// Result type for polygon operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Result type for the analysis driver.
pub type ReachResult<T> = Result<T, ReachError>;
