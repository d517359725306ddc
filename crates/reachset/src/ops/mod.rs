//! Per-step pipeline operations.
//!
//! propagate → project → repartition → collision split → repartition →
//! adjacency → adapt. Node construction lives in `graph`.
//!
//! All functions are pure given their inputs (and the oracle's answers);
//! parallel stages take a [`Parallelism`](crate::parallel::Parallelism).

mod adapt;
mod adjacency;
mod base_set;
mod grid;
mod propagate;
mod repartition;
mod split;

pub use adapt::{adapt_base_set_to_drivable_area, adapt_base_sets_to_drivable_area};
pub use adjacency::create_adjacency_map;
pub use base_set::{AdaptedBaseSet, PropagatedBaseSet};
pub use grid::{
    compute_minimum_positions_of_rectangles, discretize_rectangles, undiscretize_rectangles,
    QUOTIENT_DECIMALS,
};
pub use propagate::{
    compute_halfspace_coefficients, create_bounding_box, create_zero_state_polygon,
    project_base_sets_to_position_domain, propagate_polygon, HalfspaceCoefficients,
    SWITCHING_FRACTIONS,
};
pub use repartition::{create_repartitioned_rectangles, repartition_rectangle};
pub use split::{
    check_collision_and_split_rectangles, create_collision_free_rectangles,
    split_rectangle_into_two, MIN_SPLIT_DIAGONAL,
};

pub(crate) use base_set::position_rectangle;
