/*!
Core data model for the `traveling-crab` TSP solver.

This crate has no notion of an LP solver or a search strategy; it only defines the
shapes that the rest of the workspace agrees on: the [`instance::Instance`] distance
oracle, the mutable [`graph::CoreGraph`] of edges currently under LP control, the
[`active_tour::ActiveTour`] incumbent, the reference-counted cut representation in
[`cuts`], and the on-disk file formats in [`formats`]. The branch-and-cut search tree
itself -- `BranchNode`, `BranchHistory`, node selection -- lives in `tsp-solvers`, built
on top of this crate's data model rather than inside it.
 */

pub mod active_tour;
pub mod cuts;
pub mod error;
pub mod formats;
pub mod graph;
pub mod instance;
pub mod tolerances;
pub mod tsp_lib_spec;

pub use error::CoreError;
pub use instance::{Instance, InstanceMetadata};
