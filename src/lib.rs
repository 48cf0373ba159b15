//! # invcache
//!
//! Memoização da inversa de uma única matriz.
//!
//! Um [`CachedMatrixHolder`] guarda a matriz e, depois da primeira
//! resolução, sua inversa. Substituir a matriz descarta a inversa; a
//! próxima resolução chama o solver de novo.
//!
//! ## Módulos
//!
//! - [`cache`] - Holder de slot único e resolvedor
//! - [`solver`] - Solvers lineares (LU via `nalgebra`, Gauss-Jordan)
//! - [`hooks`] - Hooks de observação da resolução
//! - [`cli`] - Interface de linha de comando
//! - [`types`] - Tipos compartilhados

pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod hooks;
pub mod solver;
pub mod types;

pub use cache::{CachedMatrixHolder, InverseResolver};
pub use types::config::Config;
pub use types::errors::{InvError, InvResult};
pub use types::matrix::Matrix;
