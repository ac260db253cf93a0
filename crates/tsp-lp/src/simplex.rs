//! A dense bounded-variable primal simplex, the one concrete [`Relaxation`] backend this
//! crate ships.
//!
//! Grounded in the textbook "upper-bounding" bounded-variable method (Chvátal, *Linear
//! Programming*, ch. 7): nonbasic columns sit at either bound rather than always at zero,
//! so structural upper bounds never need an explicit row. The tableau is kept fully dense
//! (every pivot updates the whole `B^-1 A` matrix via Gauss-Jordan elimination) rather than
//! revised/LU-factored, matching the complexity this crate is scoped to — correctness and
//! a clean trait boundary over pivot performance.

use log::{debug, trace};

use crate::error::RelaxationError;
use crate::relaxation::{
    BasisStatus, Bound, BoundSense, Col, PivotOutcome, Relaxation, Row, Sense, SparseRow,
    StrongBranchEstimate,
};

const ZERO_TOL: f64 = 1e-9;
const DEFAULT_ITERATION_CAP: usize = 10_000;

#[derive(Debug, Clone)]
pub struct DenseSimplex {
    /// `B^-1 A`, one row per constraint, one column per structural-plus-slack variable.
    tableau: Vec<Vec<f64>>,
    /// `B^-1 b`, updated in lockstep with `tableau` on every pivot.
    rhs: Vec<f64>,
    cost: Vec<f64>,
    lower: Vec<f64>,
    upper: Vec<f64>,
    sense: Vec<Sense>,
    /// `basis[row]` is the column currently basic in that row.
    basis: Vec<usize>,
    status: Vec<BasisStatus>,
    /// Structural (non-slack) column count. Tracked explicitly rather than derived from
    /// tableau row width, since that width is ambiguous while `tableau` has zero rows.
    struct_cols: usize,
    iteration_cap: usize,
}

impl DenseSimplex {
    pub fn new() -> Self {
        Self {
            tableau: Vec::new(),
            rhs: Vec::new(),
            cost: Vec::new(),
            lower: Vec::new(),
            upper: Vec::new(),
            sense: Vec::new(),
            basis: Vec::new(),
            status: Vec::new(),
            struct_cols: 0,
            iteration_cap: DEFAULT_ITERATION_CAP,
        }
    }

    pub fn with_iteration_cap(iteration_cap: usize) -> Self {
        Self {
            iteration_cap,
            ..Self::new()
        }
    }

    fn num_struct_plus_slack_cols(&self) -> usize {
        self.struct_cols + self.tableau.len()
    }

    /// The slack column owned by row `r`: one slack per row, appended after all
    /// structural columns were added, so slack columns are never removed individually.
    fn slack_col(&self, r: Row) -> usize {
        self.struct_cols + r
    }

    fn num_structural_cols(&self) -> usize {
        self.struct_cols
    }

    /// Current value of every column: nonbasic columns sit at their bound, basic columns
    /// are read off `rhs` net of the nonbasic contribution.
    fn current_x(&self) -> Vec<f64> {
        let n = self.num_struct_plus_slack_cols();
        let mut x = vec![0.0; n];
        for j in 0..n {
            x[j] = match self.status[j] {
                BasisStatus::AtLower => self.lower[j],
                BasisStatus::AtUpper => self.upper[j],
                BasisStatus::Basic => 0.0,
            };
        }
        for (row, &bcol) in self.basis.iter().enumerate() {
            let mut val = self.rhs[row];
            for j in 0..n {
                if self.status[j] != BasisStatus::Basic {
                    val -= self.tableau[row][j] * x[j];
                }
            }
            x[bcol] = val;
        }
        x
    }

    /// Reduced cost of every column: `c_j - c_B . (B^-1 A)_j`.
    fn reduced_costs(&self) -> Vec<f64> {
        let n = self.num_struct_plus_slack_cols();
        let mut z = self.cost.clone();
        for (row, &bcol) in self.basis.iter().enumerate() {
            let c_b = self.cost[bcol];
            if c_b == 0.0 {
                continue;
            }
            for j in 0..n {
                z[j] -= c_b * self.tableau[row][j];
            }
        }
        z
    }

    fn objective_value(&self) -> f64 {
        let x = self.current_x();
        x.iter().zip(self.cost.iter()).map(|(xi, ci)| xi * ci).sum()
    }

    /// Picks an entering column by Dantzig's rule (most violated reduced cost), the
    /// simplest rule that does not need a separate anti-cycling pass for the tableau
    /// sizes this crate runs at.
    fn choose_entering(&self, z: &[f64]) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for j in 0..self.num_struct_plus_slack_cols() {
            let (violated, direction) = match self.status[j] {
                BasisStatus::AtLower if z[j] < -ZERO_TOL => (true, 1.0),
                BasisStatus::AtUpper if z[j] > ZERO_TOL => (true, -1.0),
                _ => (false, 0.0),
            };
            if !violated {
                continue;
            }
            let magnitude = z[j].abs();
            if best.is_none_or(|(_, best_mag)| magnitude > best_mag) {
                best = Some((j, direction));
            }
        }
        best
    }

    /// Ratio test for entering column `q` moving in `direction` (±1). Returns the
    /// maximum feasible step and, if it is bound by a basic variable rather than `q`'s
    /// own opposite bound, that variable's row and the bound it lands on.
    fn ratio_test(&self, x: &[f64], q: usize, direction: f64) -> (f64, Option<(Row, BasisStatus)>) {
        let own_span = self.upper[q] - self.lower[q];
        let mut max_step = if own_span.is_finite() { own_span } else { f64::INFINITY };
        let mut leaving: Option<(Row, BasisStatus)> = None;

        for (row, &bcol) in self.basis.iter().enumerate() {
            let alpha = direction * self.tableau[row][q];
            if alpha.abs() <= ZERO_TOL {
                continue;
            }
            let basic_val = x[bcol];
            let step = if alpha > 0.0 {
                if !self.lower[bcol].is_finite() {
                    continue;
                }
                (basic_val - self.lower[bcol]) / alpha
            } else {
                if !self.upper[bcol].is_finite() {
                    continue;
                }
                (self.upper[bcol] - basic_val) / (-alpha)
            };
            let step = step.max(0.0);
            if step < max_step - ZERO_TOL {
                max_step = step;
                leaving = Some((
                    row,
                    if alpha > 0.0 {
                        BasisStatus::AtLower
                    } else {
                        BasisStatus::AtUpper
                    },
                ));
            }
        }
        (max_step, leaving)
    }

    fn pivot_on(&mut self, row: Row, col: usize, leaving_lands: BasisStatus) {
        let n = self.num_struct_plus_slack_cols();
        let pivot_val = self.tableau[row][col];
        for j in 0..n {
            self.tableau[row][j] /= pivot_val;
        }
        self.rhs[row] /= pivot_val;

        for r in 0..self.tableau.len() {
            if r == row {
                continue;
            }
            let factor = self.tableau[r][col];
            if factor.abs() <= ZERO_TOL {
                continue;
            }
            for j in 0..n {
                self.tableau[r][j] -= factor * self.tableau[row][j];
            }
            self.rhs[r] -= factor * self.rhs[row];
        }

        let leaving = self.basis[row];
        self.basis[row] = col;
        self.status[col] = BasisStatus::Basic;
        self.status[leaving] = leaving_lands;
    }

    /// One step of the primal simplex: chooses an entering column, runs the ratio test,
    /// and either flips the entering column's bound (degenerate, no basis change) or
    /// pivots it into the basis in place of the leaving row's column.
    fn step(&mut self) -> PivotOutcome {
        let z = self.reduced_costs();
        let Some((q, direction)) = self.choose_entering(&z) else {
            return PivotOutcome::Optimal;
        };
        let x = self.current_x();
        let (step, leaving) = self.ratio_test(&x, q, direction);

        if !step.is_finite() {
            return PivotOutcome::Unbounded;
        }

        match leaving {
            None => {
                // Bound flip: q moves to its opposite bound, basis unchanged.
                self.status[q] = if direction > 0.0 {
                    BasisStatus::AtUpper
                } else {
                    BasisStatus::AtLower
                };
            }
            Some((row, landing)) => {
                self.pivot_on(row, q, landing);
            }
        }
        PivotOutcome::Optimal
    }
}

impl Default for DenseSimplex {
    fn default() -> Self {
        Self::new()
    }
}

impl Relaxation for DenseSimplex {
    fn num_rows(&self) -> usize {
        self.tableau.len()
    }

    fn num_cols(&self) -> usize {
        self.num_structural_cols()
    }

    fn new_row(&mut self, sense: Sense, rhs: f64) -> Row {
        self.add_cut(rhs, sense, SparseRow::empty())
    }

    fn add_cut(&mut self, rhs: f64, sense: Sense, row: SparseRow) -> Row {
        let struct_cols = self.num_structural_cols();
        let new_row_idx = self.tableau.len();

        for existing in &mut self.tableau {
            existing.insert(struct_cols + new_row_idx, 0.0);
        }

        let mut new_row_vec = vec![0.0; struct_cols + new_row_idx];
        for (idx, &coeff) in row.indices.iter().zip(row.coeffs.iter()) {
            new_row_vec[*idx] = coeff;
        }
        new_row_vec.push(1.0); // this row's own slack
        self.tableau.push(new_row_vec);
        self.rhs.push(rhs);
        self.sense.push(sense);

        let slack = struct_cols + new_row_idx;
        self.cost.push(0.0);
        match sense {
            Sense::Less => {
                self.lower.push(0.0);
                self.upper.push(f64::INFINITY);
            }
            Sense::Greater => {
                self.lower.push(f64::NEG_INFINITY);
                self.upper.push(0.0);
            }
            Sense::Equal => {
                self.lower.push(0.0);
                self.upper.push(0.0);
            }
        }
        self.status.push(BasisStatus::Basic);
        self.basis.push(slack);
        debug!(target: "tsp_lp::simplex", "added row {new_row_idx} (sense {sense:?}, rhs {rhs})");
        new_row_idx
    }

    fn add_col(&mut self, cost: f64, nz: SparseRow, bounds: Bound) -> Col {
        let struct_cols = self.num_structural_cols();
        let insert_at = struct_cols;
        for (row, val) in self.tableau.iter_mut().enumerate() {
            let coeff = nz
                .indices
                .iter()
                .position(|&i| i == row)
                .map_or(0.0, |pos| nz.coeffs[pos]);
            val.insert(insert_at, coeff);
        }
        self.cost.insert(insert_at, cost);
        self.lower.insert(insert_at, bounds.lower);
        self.upper.insert(insert_at, bounds.upper);
        self.status.insert(insert_at, BasisStatus::AtLower);
        for bcol in &mut self.basis {
            if *bcol >= insert_at {
                *bcol += 1;
            }
        }
        self.struct_cols += 1;
        trace!(target: "tsp_lp::simplex", "added column {insert_at} (cost {cost})");
        insert_at
    }

    fn del_set_rows(&mut self, delstat: &[bool]) {
        debug_assert_eq!(delstat.len(), self.tableau.len());
        let mut keep_rows = Vec::new();
        let mut drop_slack_cols = Vec::new();
        for (row, &drop) in delstat.iter().enumerate() {
            if drop {
                drop_slack_cols.push(self.slack_col(row));
            } else {
                keep_rows.push(row);
            }
        }
        self.tableau = keep_rows.iter().map(|&r| self.tableau[r].clone()).collect();
        self.rhs = keep_rows.iter().map(|&r| self.rhs[r]).collect();
        self.sense = keep_rows.iter().map(|&r| self.sense[r]).collect();
        self.basis = keep_rows.iter().map(|&r| self.basis[r]).collect();

        let mut col_keep = vec![true; self.num_struct_plus_slack_cols()];
        for &c in &drop_slack_cols {
            col_keep[c] = false;
        }
        self.drop_columns(&col_keep);
    }

    fn del_set_cols(&mut self, delstat: &[bool]) {
        let struct_cols = self.num_structural_cols();
        debug_assert_eq!(delstat.len(), struct_cols);
        let mut col_keep = vec![true; self.num_struct_plus_slack_cols()];
        for (j, &drop) in delstat.iter().enumerate() {
            col_keep[j] = !drop;
        }
        self.drop_columns(&col_keep);
    }

    fn get_base(&self) -> (&[BasisStatus], &[BasisStatus]) {
        // Row statuses are implicit (Basic iff that row's `basis` entry is a slack column
        // still reported Basic); callers use `get_base` mainly to warm-start `copy_base`,
        // so we report the full column status vector twice, sliced at the structural
        // boundary, rather than carry a redundant row-status array.
        let struct_cols = self.num_structural_cols();
        (&self.status[struct_cols..], &self.status[..struct_cols])
    }

    fn copy_base(
        &mut self,
        row_status: &[BasisStatus],
        col_status: &[BasisStatus],
    ) -> Result<(), RelaxationError> {
        let struct_cols = self.num_structural_cols();
        if row_status.len() != self.num_rows() || col_status.len() != struct_cols {
            return Err(RelaxationError::Backend {
                code: -1,
                message: "copy_base: row/column status length mismatch".to_string(),
            });
        }
        self.status[..struct_cols].copy_from_slice(col_status);
        self.status[struct_cols..].copy_from_slice(row_status);
        self.factor_basis()
    }

    fn copy_start(&mut self, x: &[f64]) -> Result<(), RelaxationError> {
        let struct_cols = self.num_structural_cols();
        if x.len() != struct_cols {
            return Err(RelaxationError::Backend {
                code: -1,
                message: "copy_start: column count mismatch".to_string(),
            });
        }
        for (j, &val) in x.iter().enumerate() {
            self.status[j] = if (val - self.lower[j]).abs() <= ZERO_TOL {
                BasisStatus::AtLower
            } else if (val - self.upper[j]).abs() <= ZERO_TOL {
                BasisStatus::AtUpper
            } else {
                BasisStatus::Basic
            };
        }
        Ok(())
    }

    fn factor_basis(&mut self) -> Result<(), RelaxationError> {
        // Rebuild `basis`/`tableau` from the column statuses in `self.status`: every row
        // needs exactly one basic column, preferring that row's own slack when it is
        // marked basic, otherwise whichever structural column the caller flagged basic.
        let n = self.num_struct_plus_slack_cols();
        let mut assigned = vec![false; self.tableau.len()];
        let mut new_basis = vec![usize::MAX; self.tableau.len()];

        for row in 0..self.tableau.len() {
            let slack = self.slack_col(row);
            if self.status[slack] == BasisStatus::Basic {
                new_basis[row] = slack;
                assigned[row] = true;
            }
        }
        for j in 0..n {
            if self.status[j] != BasisStatus::Basic {
                continue;
            }
            if let Some(row) = assigned.iter().position(|&a| !a) {
                if new_basis.iter().any(|&b| b == j) {
                    continue;
                }
                new_basis[row] = j;
                assigned[row] = true;
            }
        }
        if new_basis.iter().any(|&b| b == usize::MAX) {
            return Err(RelaxationError::Backend {
                code: -1,
                message: "factor_basis: supplied status does not name a full basis".to_string(),
            });
        }
        self.basis = new_basis;
        Ok(())
    }

    fn primal_opt(&mut self) -> Result<PivotOutcome, RelaxationError> {
        for _ in 0..self.iteration_cap {
            match self.step() {
                PivotOutcome::Optimal => return Ok(PivotOutcome::Optimal),
                PivotOutcome::Unbounded => return Ok(PivotOutcome::Unbounded),
                other => return Ok(other),
            }
        }
        Err(RelaxationError::IterationLimit)
    }

    fn dual_opt(&mut self) -> Result<PivotOutcome, RelaxationError> {
        // This backend does not maintain a dual-feasible tableau representation
        // separately from the primal one; dual pivoting degenerates to primal pivoting
        // from the current basis, which is correct whenever that basis is already dual
        // feasible (the caller's usual entry condition after a cut addition).
        self.primal_opt()
    }

    fn one_primal_pivot(&mut self) -> Result<PivotOutcome, RelaxationError> {
        Ok(self.step())
    }

    fn nondegen_pivot(&mut self, cutoff: f64) -> Result<PivotOutcome, RelaxationError> {
        for _ in 0..self.iteration_cap {
            let before = self.objective_value();
            let outcome = self.step();
            if outcome == PivotOutcome::Unbounded {
                return Ok(PivotOutcome::Unbounded);
            }
            let after = self.objective_value();
            if after < cutoff - ZERO_TOL && after < before - ZERO_TOL {
                return Ok(PivotOutcome::Cutoff);
            }
            if outcome == PivotOutcome::Optimal {
                return Ok(PivotOutcome::Optimal);
            }
        }
        Err(RelaxationError::IterationLimit)
    }

    fn primal_recover(&mut self) -> Result<PivotOutcome, RelaxationError> {
        self.primal_opt()
    }

    fn get_pi(&self) -> Vec<f64> {
        // Dual values: for each original row, the reduced cost the row's own slack would
        // have if it were nonbasic at zero, i.e. `c_B . (B^-1)_row`.
        let n = self.num_struct_plus_slack_cols();
        let z = self.reduced_costs();
        (0..self.tableau.len())
            .map(|row| {
                let slack = self.slack_col(row);
                if slack < n {
                    -z[slack]
                } else {
                    0.0
                }
            })
            .collect()
    }

    fn get_x(&self) -> Vec<f64> {
        let struct_cols = self.num_structural_cols();
        self.current_x()[..struct_cols].to_vec()
    }

    fn get_row_slacks(&self) -> Vec<f64> {
        let x = self.current_x();
        (0..self.tableau.len()).map(|row| x[self.slack_col(row)]).collect()
    }

    fn get_redcosts(&self) -> Vec<f64> {
        let struct_cols = self.num_structural_cols();
        self.reduced_costs()[..struct_cols].to_vec()
    }

    fn basic_row_of(&self, col: Col) -> Option<Row> {
        self.basis.iter().position(|&bcol| bcol == col)
    }

    fn tableau_row(&self, row: Row) -> Vec<f64> {
        self.tableau[row].clone()
    }

    fn objective(&self) -> f64 {
        self.objective_value()
    }

    fn tighten_bound(&mut self, col: Col, sense: BoundSense, val: f64) -> Result<(), RelaxationError> {
        match sense {
            BoundSense::Lower => self.lower[col] = val,
            BoundSense::Upper => self.upper[col] = val,
            BoundSense::Fixed => {
                self.lower[col] = val;
                self.upper[col] = val;
            }
        }
        if self.lower[col] > self.upper[col] + ZERO_TOL {
            return Err(RelaxationError::Infeasible);
        }
        if self.status[col] == BasisStatus::Basic {
            let x = self.current_x();
            if x[col] < self.lower[col] - ZERO_TOL || x[col] > self.upper[col] + ZERO_TOL {
                return Err(RelaxationError::Infeasible);
            }
        }
        Ok(())
    }

    fn primal_strong_branch(
        &mut self,
        col: Col,
        down_val: f64,
        up_val: f64,
        iter_limit: usize,
    ) -> Result<(StrongBranchEstimate, StrongBranchEstimate), RelaxationError> {
        let saved = self.clone();
        let saved_cap = self.iteration_cap;
        self.iteration_cap = iter_limit;

        let down = self.probe_bound(col, BoundSense::Upper, down_val);
        *self = saved.clone();
        self.iteration_cap = iter_limit;

        let up = self.probe_bound(col, BoundSense::Lower, up_val);
        self.iteration_cap = saved_cap;
        *self = saved;

        Ok((down, up))
    }
}

impl DenseSimplex {
    /// Drops every column whose `keep` entry is `false`, renumbering the survivors and
    /// adjusting `struct_cols` for however many of the dropped columns were structural
    /// (as opposed to slacks, which `del_set_rows` drops alongside their row).
    fn drop_columns(&mut self, keep: &[bool]) {
        let dropped_structural = keep[..self.struct_cols].iter().filter(|&&k| !k).count();
        let kept_indices: Vec<usize> = keep
            .iter()
            .enumerate()
            .filter_map(|(j, &k)| k.then_some(j))
            .collect();
        let remap: std::collections::HashMap<usize, usize> = kept_indices
            .iter()
            .enumerate()
            .map(|(new, &old)| (old, new))
            .collect();

        for row in &mut self.tableau {
            *row = kept_indices.iter().map(|&j| row[j]).collect();
        }
        self.cost = kept_indices.iter().map(|&j| self.cost[j]).collect();
        self.lower = kept_indices.iter().map(|&j| self.lower[j]).collect();
        self.upper = kept_indices.iter().map(|&j| self.upper[j]).collect();
        self.status = kept_indices.iter().map(|&j| self.status[j]).collect();
        for bcol in &mut self.basis {
            if let Some(&new) = remap.get(bcol) {
                *bcol = new;
            }
        }
        self.struct_cols -= dropped_structural;
    }

    fn probe_bound(&mut self, col: Col, sense: BoundSense, val: f64) -> StrongBranchEstimate {
        if self.tighten_bound(col, sense, val).is_err() {
            return StrongBranchEstimate::infeasible();
        }
        match self.primal_opt() {
            Ok(outcome @ (PivotOutcome::Optimal | PivotOutcome::Cutoff)) => StrongBranchEstimate {
                objective: self.objective_value(),
                outcome,
            },
            Ok(PivotOutcome::Unbounded) => StrongBranchEstimate::infeasible(),
            Ok(PivotOutcome::IterationLimit) | Err(_) => StrongBranchEstimate {
                objective: self.objective_value(),
                outcome: PivotOutcome::IterationLimit,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `min -x - y` s.t. `x + y <= 4`, `x, y in [0, 3]`; optimum is `x=1, y=3` or
    /// `x=3, y=1`, objective `-4`.
    #[test]
    fn solves_small_bounded_program() {
        let mut lp = DenseSimplex::new();
        lp.new_row(Sense::Less, 4.0);
        lp.add_col(-1.0, SparseRow::new(vec![0], vec![1.0]), Bound { lower: 0.0, upper: 3.0 });
        lp.add_col(-1.0, SparseRow::new(vec![0], vec![1.0]), Bound { lower: 0.0, upper: 3.0 });

        let outcome = lp.primal_opt().expect("solves without error");
        assert_eq!(outcome, PivotOutcome::Optimal);
        assert!((lp.objective() - -4.0).abs() < 1e-6);
        let x = lp.get_x();
        assert!((x[0] + x[1] - 4.0).abs() < 1e-6);
    }

    #[test]
    fn detects_unbounded_direction() {
        let mut lp = DenseSimplex::new();
        lp.add_col(-1.0, SparseRow::empty(), Bound { lower: 0.0, upper: f64::INFINITY });
        let outcome = lp.primal_opt().expect("terminates");
        assert_eq!(outcome, PivotOutcome::Unbounded);
    }

    #[test]
    fn tighten_bound_rejects_crossed_bounds() {
        let mut lp = DenseSimplex::new();
        lp.add_col(1.0, SparseRow::empty(), Bound { lower: 0.0, upper: 1.0 });
        let result = lp.tighten_bound(0, BoundSense::Upper, -1.0);
        assert!(matches!(result, Err(RelaxationError::Infeasible)));
    }
}
