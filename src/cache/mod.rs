//! Cache de slot único para a inversa de uma matriz.
//!
//! Este módulo guarda uma matriz junto com sua inversa calculada sob
//! demanda. A inversa só é recalculada depois que a matriz é substituída
//! com `set`; falhas de cálculo nunca ficam em cache.
//!
//! ## Exemplo
//!
//! ```rust
//! use invcache::cache::{CachedMatrixHolder, InverseResolver};
//! use invcache::types::matrix::Matrix;
//!
//! let a = Matrix::from_rows(vec![vec![2.0, 0.0], vec![0.0, 2.0]]).unwrap();
//! let mut holder = CachedMatrixHolder::new(a);
//! let mut resolver = InverseResolver::default();
//!
//! let inv = resolver.invert(&mut holder).unwrap();
//! assert_eq!(inv.get(0, 0), 0.5);
//!
//! // Segunda chamada vem do cache
//! resolver.invert(&mut holder).unwrap();
//! assert_eq!(resolver.stats().solver_invocations(), 1);
//! ```

mod holder;
mod resolver;

pub use holder::{CachedInverse, CachedMatrixHolder};
pub use resolver::{InverseResolver, ResolverStats};
