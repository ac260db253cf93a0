use thiserror::Error;

/// Errors surfaced at the [`crate::Relaxation`] boundary.
///
/// Mirrors the shape of `tsp_parser::ParserError`: one variant per failure class the
/// backend can report, no variant for infeasibility during normal operation (that is a
/// `PivotOutcome`, not an error — see §7 of the design notes this crate was built against).
#[derive(Error, Debug)]
pub enum RelaxationError {
    #[error("LP backend failed (code {code}): {message}")]
    Backend { code: i32, message: String },

    #[error("LP relaxation is primal infeasible")]
    Infeasible,

    #[error("simplex iteration limit exceeded")]
    IterationLimit,
}
