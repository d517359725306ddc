//! Reachable-set graph: nodes, arena handles, and propositions.
//!
//! Each time step owns a `Vec<ReachNode>`; links across steps are
//! `NodeRef { time_step, index }` lookups into those arenas, so the graph is
//! an append-only DAG without owning cycles.

mod node;
mod proposition;

pub use node::{
    build_reachable_set_nodes, create_reachable_set_nodes_continuous,
    create_reachable_set_nodes_semantic, NodeRef, NodeStrategy, ReachNode,
};
pub use proposition::{Proposition, RegionProposition, RegionRelation};
