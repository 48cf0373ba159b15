//! Solver por decomposição LU, delegada ao `nalgebra`.

use nalgebra::DMatrix;

use crate::types::config::SolverConfig;
use crate::types::matrix::Matrix;
use crate::{InvError, InvResult};

use super::base::{is_negligible, pivot_threshold, right_hand_side};
use super::InverseSolver;

/// Decomposição `PA = LU` com pivoteamento parcial (`nalgebra::LU`), seguida
/// de substituição direta e reversa para todas as colunas de `B`.
///
/// A diagonal de `U` é conferida contra o limite de pivô antes de resolver;
/// a coluna reportada em `SingularMatrix` é a do primeiro pivô nulo.
#[derive(Debug, Clone)]
pub struct LuSolver {
    tolerance: f64,
}

impl LuSolver {
    /// Cria um novo solver com a tolerância de pivô dada.
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Cria o solver a partir da configuração.
    pub fn from_config(config: &SolverConfig) -> Self {
        Self::new(config.tolerance)
    }
}

impl Default for LuSolver {
    fn default() -> Self {
        Self::from_config(&SolverConfig::default())
    }
}

fn to_dense(m: &Matrix) -> DMatrix<f64> {
    DMatrix::from_fn(m.rows(), m.cols(), |r, c| m.get(r, c))
}

fn from_dense(d: &DMatrix<f64>) -> Matrix {
    let mut out = Matrix::zeros(d.nrows(), d.ncols());
    for r in 0..d.nrows() {
        for c in 0..d.ncols() {
            out.set(r, c, d[(r, c)]);
        }
    }
    out
}

impl InverseSolver for LuSolver {
    fn name(&self) -> &str {
        "lu"
    }

    fn solve(&self, a: &Matrix, rhs: Option<&Matrix>) -> InvResult<Matrix> {
        let b = right_hand_side(a, rhs)?;
        let n = a.rows();
        if n == 0 {
            return Ok(b);
        }

        let threshold = pivot_threshold(a, self.tolerance);
        let lu = to_dense(a).lu();
        let u = lu.u();
        if let Some(column) = (0..n).find(|&k| is_negligible(u[(k, k)], threshold)) {
            return Err(InvError::SingularMatrix { column });
        }

        let x = lu
            .solve(&to_dense(&b))
            .ok_or_else(|| InvError::other("substituição LU falhou com pivô nulo"))?;
        Ok(from_dense(&x))
    }
}
