//! Safe Gomory mixed-integer cuts (§4.5): pure fractional Gomory cuts over the simplex
//! tableau, reconstructed with exact rational arithmetic so a cut's coefficients are never
//! corrupted by floating-point tableau error before they reach the master LP.
//!
//! Restricted to structural (edge) columns: the tableau row backing a fractional basic
//! edge variable also carries coefficients on other rows' slack columns, but those slacks
//! have no edge-space meaning to project back into, so this separator drops their
//! contribution rather than re-deriving a mixed projection -- edges are always bounded
//! `[0, 1]` in this system (`CoreLp::new`/`add_edges`), which is what lets the bound-shift
//! arithmetic below skip reading the bounds back off the `Relaxation`.

use tsp_core::cuts::hypergraph::{HyperGraph, Sense};
use tsp_lp::{BasisStatus, ExactNum, Relaxation, SparseRow};

use crate::corelp::CutCandidate;

const MAX_QUEUE: usize = 50;
const DENSE_FRACTION: f64 = 0.05;

struct Scored {
    candidate: CutCandidate,
    violation: f64,
    density: f64,
}

/// Scans every basic structural column with a fractional value for a violated Gomory
/// fractional cut, keeping at most [`MAX_QUEUE`] ranked by violation -- or, if the most
/// violated cut is denser than [`DENSE_FRACTION`] of the columns, only that one.
pub fn separate<R: Relaxation>(relaxation: &R, num_struct_cols: usize, tol: f64) -> Vec<CutCandidate> {
    let x = relaxation.get_x();
    let (_, col_status) = relaxation.get_base();
    let mut scored = Vec::new();

    for col in 0..num_struct_cols {
        if col_status[col] != BasisStatus::Basic {
            continue;
        }
        let value = x[col];
        if (value - value.round()).abs() < tol {
            continue;
        }
        let Some(row) = relaxation.basic_row_of(col) else {
            continue;
        };
        if let Some(scored_candidate) = gmi_from_row(relaxation, row, col, num_struct_cols, value, col_status) {
            scored.push(scored_candidate);
        }
    }

    scored.sort_by(|a, b| b.violation.partial_cmp(&a.violation).unwrap());
    match scored.first() {
        Some(top) if top.density > DENSE_FRACTION => {
            vec![scored.into_iter().next().unwrap().candidate]
        }
        _ => scored.into_iter().take(MAX_QUEUE).map(|s| s.candidate).collect(),
    }
}

/// Builds the pure fractional Gomory cut off tableau row `row` (which backs basic
/// structural column `basic_col`, currently at fractional `value`), per the translation
/// derived for `[0, 1]`-bounded nonbasic columns: a nonbasic-at-lower column `k` con-
/// tributes `frac(-a_rk)` directly; a nonbasic-at-upper column contributes `-frac(a_rk)`
/// plus `frac(a_rk)` folded into the right-hand side.
fn gmi_from_row<R: Relaxation>(
    relaxation: &R,
    row: usize,
    basic_col: usize,
    num_struct_cols: usize,
    value: f64,
    col_status: &[BasisStatus],
) -> Option<Scored> {
    let tableau_row = relaxation.tableau_row(row);
    let f0 = ExactNum::from_f64_reconstructed(value).fractional_part();
    let f0_val = f0.to_f64();
    if f0_val < 1e-9 || f0_val > 1.0 - 1e-9 {
        return None;
    }

    let mut indices = Vec::new();
    let mut coeffs = Vec::new();
    let mut rhs = f0_val;

    for k in 0..num_struct_cols {
        if k == basic_col || col_status[k] == BasisStatus::Basic {
            continue;
        }
        let a_rk = tableau_row[k];
        if a_rk.abs() < 1e-12 {
            continue;
        }
        match col_status[k] {
            BasisStatus::AtLower => {
                let c_k = ExactNum::from_f64_reconstructed(-a_rk).fractional_part();
                let coeff = c_k.to_f64();
                if coeff.abs() > 1e-9 {
                    indices.push(k);
                    coeffs.push(coeff);
                }
            }
            BasisStatus::AtUpper => {
                let c_k = ExactNum::from_f64_reconstructed(a_rk).fractional_part();
                let coeff = c_k.to_f64();
                if coeff.abs() > 1e-9 {
                    indices.push(k);
                    coeffs.push(-coeff);
                }
                rhs -= coeff;
            }
            BasisStatus::Basic => unreachable!("filtered above"),
        }
    }

    if indices.is_empty() {
        return None;
    }

    let x = relaxation.get_x();
    let activity: f64 = indices.iter().zip(coeffs.iter()).map(|(&k, &c)| c * x[k]).sum();
    let violation = rhs - activity;
    if violation < 1e-9 {
        return None;
    }

    let density = indices.len() as f64 / num_struct_cols.max(1) as f64;
    let sparse_row = SparseRow::new(indices, coeffs);
    let hyper = HyperGraph::new_opaque(Sense::Greater, rhs);
    Some(Scored {
        candidate: CutCandidate { hyper, row: Some(sparse_row) },
        violation,
        density,
    })
}
