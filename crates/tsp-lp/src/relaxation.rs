//! The abstract LP facade every CoreLP pivot, separator, and pricer call goes through.
//!
//! `tsp-solvers` never talks to a simplex tableau directly; it talks to a `Relaxation`.
//! This keeps the backend swappable (the dense tableau in [`crate::simplex`] today, a
//! revised/LU-factored backend later) without touching call sites.

use crate::error::RelaxationError;

pub type Col = usize;
pub type Row = usize;

/// Constraint/row sense. `Equal` rows are used for branch bound-tightening expressed as
/// rows rather than column bound changes, and for degree rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Less,
    Greater,
    Equal,
}

/// Which bound a `tighten_bound` call moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSense {
    Lower,
    Upper,
    Fixed,
}

/// A column's current position relative to its bounds. Basic columns carry the current
/// solution value implicitly via the tableau; nonbasic columns sit exactly at the bound
/// named here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasisStatus {
    Basic,
    AtLower,
    AtUpper,
}

/// What a pivot call accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotOutcome {
    /// No improving pivot exists; the current basis is optimal.
    Optimal,
    /// The objective is unbounded in the direction of an improving column.
    Unbounded,
    /// `nondegen_pivot`'s cutoff was reached before optimality.
    Cutoff,
    /// The iteration cap was hit before either of the above.
    IterationLimit,
}

/// One row of a sparse constraint, used both for `add_cut` and `add_col`'s column.
#[derive(Debug, Clone, Default)]
pub struct SparseRow {
    pub indices: Vec<usize>,
    pub coeffs: Vec<f64>,
}

impl SparseRow {
    pub fn new(indices: Vec<usize>, coeffs: Vec<f64>) -> Self {
        debug_assert_eq!(indices.len(), coeffs.len());
        Self { indices, coeffs }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Bounds on a single column or on the two-sided primal estimate a strong-branch probe
/// produces for one direction.
#[derive(Debug, Clone, Copy)]
pub struct Bound {
    pub lower: f64,
    pub upper: f64,
}

/// The result of probing one branching direction during strong branching. `DoubleMax`
/// is represented as `f64::MAX`, matching §7's "LP-reported infeasibility during strong
/// branching yields a large-positive estimate".
#[derive(Debug, Clone, Copy)]
pub struct StrongBranchEstimate {
    pub objective: f64,
    pub outcome: PivotOutcome,
}

impl StrongBranchEstimate {
    pub fn infeasible() -> Self {
        Self {
            objective: f64::MAX,
            outcome: PivotOutcome::Optimal,
        }
    }
}

/// Opaque facade over a simplex-based LP solver.
///
/// **Invariant:** the `Relaxation` owns no copy of the `HyperGraph` cuts; row `n + k` of
/// the LP corresponds to `HyperGraph` `k` in `ExternalCuts`. Callers are responsible for
/// keeping row and cut-bank indices in lockstep; this trait only ever deletes or appends
/// rows at the caller's explicit direction.
pub trait Relaxation {
    fn num_rows(&self) -> usize;
    fn num_cols(&self) -> usize;

    /// Appends an empty row (all-zero coefficients) with the given sense/rhs, returning
    /// its index. Used for degree rows set up before any columns exist.
    fn new_row(&mut self, sense: Sense, rhs: f64) -> Row;

    /// Appends a cut row with the given sparse coefficients, returning its index.
    fn add_cut(&mut self, rhs: f64, sense: Sense, row: SparseRow) -> Row;

    /// Appends a column with the given objective cost, constraint-matrix entries, and
    /// bounds, returning its index. The new column starts nonbasic at its lower bound.
    fn add_col(&mut self, cost: f64, nz: SparseRow, bounds: Bound) -> Col;

    /// Deletes the rows marked `true` in `delstat` (one entry per current row).
    fn del_set_rows(&mut self, delstat: &[bool]);

    /// Deletes the columns marked `true` in `delstat` (one entry per current column).
    fn del_set_cols(&mut self, delstat: &[bool]);

    fn get_base(&self) -> (&[BasisStatus], &[BasisStatus]);

    /// Installs an externally supplied basis (row statuses, then column statuses) as a
    /// warm start. Fails if the statuses are structurally inconsistent (wrong counts, or
    /// the number of basic columns does not equal `num_rows`).
    fn copy_base(
        &mut self,
        row_status: &[BasisStatus],
        col_status: &[BasisStatus],
    ) -> Result<(), RelaxationError>;

    /// Installs a starting primal point, used to seed the active tour's edge incidence
    /// vector before a pivot.
    fn copy_start(&mut self, x: &[f64]) -> Result<(), RelaxationError>;

    /// Refactors the basis from scratch (a zero-iteration "factor only" solve), used to
    /// recover numerically after a long run of updates.
    fn factor_basis(&mut self) -> Result<(), RelaxationError>;

    fn primal_opt(&mut self) -> Result<PivotOutcome, RelaxationError>;
    fn dual_opt(&mut self) -> Result<PivotOutcome, RelaxationError>;

    /// Exactly one primal pivot, whatever its degeneracy.
    fn one_primal_pivot(&mut self) -> Result<PivotOutcome, RelaxationError>;

    /// Pivots until the objective strictly improves past `cutoff` or optimality is
    /// reached, guaranteeing at least one non-degenerate pivot off a degenerate start.
    fn nondegen_pivot(&mut self, cutoff: f64) -> Result<PivotOutcome, RelaxationError>;

    /// Attempts to restore primal feasibility after bound changes (branching) without
    /// reoptimizing the objective. Returns `Optimal` on success.
    fn primal_recover(&mut self) -> Result<PivotOutcome, RelaxationError>;

    fn get_pi(&self) -> Vec<f64>;
    fn get_x(&self) -> Vec<f64>;
    fn get_row_slacks(&self) -> Vec<f64>;
    fn get_redcosts(&self) -> Vec<f64>;

    /// The row `col` currently sits basic in, or `None` if `col` is nonbasic. Used by
    /// SafeGMI to locate the tableau row backing a fractional structural column.
    fn basic_row_of(&self, col: Col) -> Option<Row>;

    /// Full tableau row `row` (`B^-1 A`), one entry per structural-then-slack column.
    fn tableau_row(&self, row: Row) -> Vec<f64>;

    fn objective(&self) -> f64;

    /// Tightens one column's bound in place (a branch decision).
    fn tighten_bound(&mut self, col: Col, sense: BoundSense, val: f64) -> Result<(), RelaxationError>;

    /// Probes both branching directions on `col` (fixing it at `down_val`/`up_val` in
    /// turn), reoptimizing each with an iteration cap, then restoring the original bound.
    /// Never returns an error for infeasibility: an infeasible direction is reported as
    /// [`StrongBranchEstimate::infeasible`].
    fn primal_strong_branch(
        &mut self,
        col: Col,
        down_val: f64,
        up_val: f64,
        iter_limit: usize,
    ) -> Result<(StrongBranchEstimate, StrongBranchEstimate), RelaxationError>;
}
