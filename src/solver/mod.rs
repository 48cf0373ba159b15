//! Solvers lineares do invcache.
//!
//! Este módulo contém as implementações do cálculo caro que o cache
//! memoiza: decomposição LU via `nalgebra` (padrão) e eliminação de
//! Gauss-Jordan escrita à mão.

mod base;
mod gauss_jordan;
mod lu;

pub use base::InverseSolver;
pub use gauss_jordan::GaussJordanSolver;
pub use lu::LuSolver;

use crate::types::config::{SolverConfig, SolverMethod};

/// Cria o solver configurado.
pub fn build_solver(config: &SolverConfig) -> Box<dyn InverseSolver> {
    match config.method {
        SolverMethod::GaussJordan => Box::new(GaussJordanSolver::from_config(config)),
        SolverMethod::Lu => Box::new(LuSolver::from_config(config)),
    }
}
