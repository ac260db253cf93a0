use thiserror::Error;
use tsp_core::CoreError;
use tsp_lp::RelaxationError;

/// Errors raised above the `Relaxation`/`tsp-core` boundary: CoreLP's pivot loop, the
/// separator pipeline, the pricer, and the ABC search.
#[derive(Error, Debug)]
pub enum SolveError {
    #[error(transparent)]
    Relaxation(#[from] RelaxationError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("strong branching failed to reach a conclusive estimate for both directions")]
    StrongBranchFailed,
}
