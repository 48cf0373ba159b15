//! Trait base para solvers lineares.

use crate::types::matrix::Matrix;
use crate::{InvError, InvResult};

/// Trait para solvers de sistemas lineares `A X = B`.
///
/// Cada implementação encapsula um método de eliminação e fornece
/// uma interface única para o resolvedor do cache.
pub trait InverseSolver: Send + Sync {
    /// Retorna o nome do solver.
    fn name(&self) -> &str;

    /// Resolve `A X = B`.
    ///
    /// # Arguments
    ///
    /// * `a` - Matriz de coeficientes (precisa ser quadrada)
    /// * `rhs` - Lado direito `B`; `None` usa a identidade, ou seja, inverte `a`
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` se `a` não for quadrada ou se `rhs` não tiver o
    /// mesmo número de linhas; `NonFiniteEntry` se `a` ou `rhs` tiver infinito
    /// ou NaN; `SingularMatrix` se `a` não tiver inversa.
    fn solve(&self, a: &Matrix, rhs: Option<&Matrix>) -> InvResult<Matrix>;

    /// Calcula a inversa de `a`.
    fn invert(&self, a: &Matrix) -> InvResult<Matrix> {
        self.solve(a, None)
    }
}

/// Valida formatos e entradas e devolve o lado direito efetivo.
pub(crate) fn right_hand_side(a: &Matrix, rhs: Option<&Matrix>) -> InvResult<Matrix> {
    if !a.is_square() {
        return Err(InvError::dimension(format!(
            "matriz {}x{} não é quadrada",
            a.rows(),
            a.cols()
        )));
    }
    ensure_finite(a)?;

    match rhs {
        Some(b) if b.rows() != a.rows() => Err(InvError::dimension(format!(
            "lado direito tem {} linhas, esperado {}",
            b.rows(),
            a.rows()
        ))),
        Some(b) => {
            ensure_finite(b)?;
            Ok(b.clone())
        }
        None => Ok(Matrix::identity(a.rows())),
    }
}

fn ensure_finite(m: &Matrix) -> InvResult<()> {
    match m.first_non_finite() {
        Some((row, col)) => Err(InvError::NonFiniteEntry { row, col }),
        None => Ok(()),
    }
}

/// Limite abaixo do qual um pivô conta como nulo: `tolerance * n * max|a_ij|`.
///
/// Calculado uma vez por resolução, acompanha a escala da matriz. Para a
/// matriz nula o limite é zero e o primeiro pivô já é nulo.
pub(crate) fn pivot_threshold(a: &Matrix, tolerance: f64) -> f64 {
    tolerance * a.rows() as f64 * a.max_abs()
}

/// Índice da linha com o maior pivô em módulo na coluna `col`, a partir de `col`.
pub(crate) fn pivot_row(rows: &[Vec<f64>], col: usize) -> usize {
    (col..rows.len())
        .max_by(|&i, &j| {
            rows[i][col]
                .abs()
                .partial_cmp(&rows[j][col].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(col)
}

/// Um pivô conta como nulo se não for estritamente maior que o limite.
/// NaN também conta como nulo.
pub(crate) fn is_negligible(value: f64, threshold: f64) -> bool {
    !(value.abs() > threshold)
}
