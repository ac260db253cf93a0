/*!
Search machinery built on top of `tsp-core`'s data model and `tsp-lp`'s `Relaxation`
facade: the primal pivot loop ([`corelp`]), separators, the pricer, and the
augment-branch-cut search tree.
 */

pub mod branch;
pub mod corelp;
pub mod error;
pub mod pricer;
pub mod separators;
pub mod solver;

pub use branch::{BranchDecision, BranchHistory, BranchNode, EdgeFix, NodeSelector, NodeStatus};
pub use corelp::{CoreLp, CutCandidate, PivotClass};
pub use error::SolveError;
pub use pricer::{PriceOutcome, Pricer};
pub use solver::{SolveOutcome, Solver};
