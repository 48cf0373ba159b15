//! Solver por eliminação de Gauss-Jordan.

use crate::types::config::SolverConfig;
use crate::types::matrix::Matrix;
use crate::{InvError, InvResult};

use super::base::{is_negligible, pivot_row, pivot_threshold, right_hand_side};
use super::InverseSolver;

/// Eliminação de Gauss-Jordan com pivoteamento parcial sobre `[A | B]`.
#[derive(Debug, Clone)]
pub struct GaussJordanSolver {
    tolerance: f64,
}

impl GaussJordanSolver {
    /// Cria um novo solver com a tolerância de pivô dada.
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Cria o solver a partir da configuração.
    pub fn from_config(config: &SolverConfig) -> Self {
        Self::new(config.tolerance)
    }
}

impl Default for GaussJordanSolver {
    fn default() -> Self {
        Self::from_config(&SolverConfig::default())
    }
}

impl InverseSolver for GaussJordanSolver {
    fn name(&self) -> &str {
        "gauss_jordan"
    }

    fn solve(&self, a: &Matrix, rhs: Option<&Matrix>) -> InvResult<Matrix> {
        let b = right_hand_side(a, rhs)?;
        let n = a.rows();
        let threshold = pivot_threshold(a, self.tolerance);

        // Matriz aumentada [A | B]
        let mut aug: Vec<Vec<f64>> = (0..n)
            .map(|r| {
                let mut row = a.row(r).to_vec();
                row.extend_from_slice(b.row(r));
                row
            })
            .collect();

        for col in 0..n {
            let p = pivot_row(&aug, col);
            if is_negligible(aug[p][col], threshold) {
                return Err(InvError::SingularMatrix { column: col });
            }
            aug.swap(col, p);

            let pivot = aug[col][col];
            for v in aug[col].iter_mut() {
                *v /= pivot;
            }

            let pivot_values = aug[col].clone();
            for (r, row) in aug.iter_mut().enumerate() {
                if r == col {
                    continue;
                }
                let factor = row[col];
                if factor == 0.0 {
                    continue;
                }
                for (v, p) in row.iter_mut().zip(&pivot_values).skip(col) {
                    *v -= factor * p;
                }
            }
        }

        Matrix::from_rows(aug.into_iter().map(|row| row[n..].to_vec()).collect())
    }
}
