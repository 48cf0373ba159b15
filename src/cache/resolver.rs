//! Resolução da inversa usando o cache do holder.

use crate::hooks::{Hook, HookContext, HookSystem};
use crate::solver::{build_solver, InverseSolver, LuSolver};
use crate::types::config::Config;
use crate::types::matrix::Matrix;
use crate::InvResult;

use super::CachedMatrixHolder;

/// Estatísticas do resolvedor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    /// Resoluções atendidas pelo cache.
    pub hits: u64,

    /// Resoluções que precisaram do solver.
    pub misses: u64,

    /// Cálculos bem-sucedidos.
    pub computations: u64,

    /// Cálculos que falharam.
    pub failures: u64,
}

impl ResolverStats {
    /// Calcula a taxa de acerto.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Total de vezes em que o solver foi chamado.
    pub fn solver_invocations(&self) -> u64 {
        self.computations + self.failures
    }
}

/// Produz a inversa da matriz de um holder, usando o cache quando presente.
///
/// Falhas do solver são propagadas sem retry e sem alterar o cache, então a
/// próxima chamada tenta calcular de novo. Erros de hooks nunca chegam ao
/// chamador.
pub struct InverseResolver {
    solver: Box<dyn InverseSolver>,
    hooks: HookSystem,
    stats: ResolverStats,
}

impl InverseResolver {
    /// Cria um resolvedor com o solver dado e os hooks padrão.
    pub fn new(solver: Box<dyn InverseSolver>) -> Self {
        Self {
            solver,
            hooks: HookSystem::with_defaults(),
            stats: ResolverStats::default(),
        }
    }

    /// Cria o resolvedor com o solver da configuração.
    pub fn from_config(config: &Config) -> Self {
        Self::new(build_solver(&config.solver))
    }

    /// Substitui o sistema de hooks.
    pub fn with_hooks(mut self, hooks: HookSystem) -> Self {
        self.hooks = hooks;
        self
    }

    /// Registra mais um hook.
    pub fn register_hook(&mut self, hook: Box<dyn Hook>) {
        self.hooks.register(hook);
    }

    /// Nome do solver em uso.
    pub fn solver_name(&self) -> &str {
        self.solver.name()
    }

    /// Retorna estatísticas acumuladas.
    pub fn stats(&self) -> ResolverStats {
        self.stats
    }

    /// Inverte a matriz do holder.
    pub fn invert(&mut self, holder: &mut CachedMatrixHolder) -> InvResult<Matrix> {
        self.resolve(holder, None)
    }

    /// Resolve a inversa da matriz do holder.
    ///
    /// Com o cache preenchido, devolve a inversa armazenada sem consultar a
    /// matriz atual nem `rhs`. Sem cache, repassa `rhs` ao solver sem
    /// alterações (`None` inverte, `Some(b)` resolve `A X = B`) e armazena o
    /// resultado com `set_inverse`.
    pub fn resolve(
        &mut self,
        holder: &mut CachedMatrixHolder,
        rhs: Option<&Matrix>,
    ) -> InvResult<Matrix> {
        if let Some(inverse) = holder.get_inverse() {
            self.stats.hits += 1;
            if rhs.is_some() {
                tracing::debug!(
                    holder_id = %holder.id(),
                    "Right-hand side ignored on cache hit"
                );
            }

            self.notify(&HookContext::CacheHit {
                holder_id: holder.id(),
                inverse,
            });

            tracing::info!(holder_id = %holder.id(), "returning cached result");
            return Ok(inverse.clone());
        }

        self.stats.misses += 1;
        let holder_id = holder.id().to_string();
        let value = holder.get();
        let fingerprint = value.fingerprint();

        self.notify(&HookContext::CacheMiss {
            holder_id: &holder_id,
            value,
        });

        let inverse = match self.solver.solve(value, rhs) {
            Ok(inverse) => inverse,
            Err(error) => {
                self.stats.failures += 1;
                self.notify(&HookContext::Failed {
                    holder_id: &holder_id,
                    solver: self.solver.name(),
                    error: &error,
                });
                return Err(error);
            }
        };

        self.stats.computations += 1;
        holder.set_inverse(inverse.clone());

        self.notify(&HookContext::Computed {
            holder_id: &holder_id,
            solver: self.solver.name(),
            inverse: &inverse,
        });

        tracing::info!(
            holder_id = %holder_id,
            solver = self.solver.name(),
            fingerprint = %fingerprint,
            "returning computed result"
        );
        Ok(inverse)
    }

    /// Executa os hooks do evento. Um hook que falha é registrado e ignorado:
    /// o resultado da resolução e o estado do cache não dependem dos hooks.
    fn notify(&self, context: &HookContext<'_>) {
        if let Err(error) = self.hooks.run(context) {
            tracing::warn!(
                event = %context.event(),
                holder_id = %context.holder_id(),
                error = %error,
                "Hook failed"
            );
        }
    }
}

impl Default for InverseResolver {
    fn default() -> Self {
        Self::new(Box::new(LuSolver::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::{HookEvent, MetricsHook};
    use crate::solver::GaussJordanSolver;
    use crate::types::config::SolverMethod;
    use crate::InvError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    // Solver de teste que conta invocações
    struct CountingSolver {
        inner: GaussJordanSolver,
        calls: Arc<AtomicUsize>,
    }

    impl CountingSolver {
        fn new(calls: Arc<AtomicUsize>) -> Self {
            Self {
                inner: GaussJordanSolver::default(),
                calls,
            }
        }
    }

    impl InverseSolver for CountingSolver {
        fn name(&self) -> &str {
            "counting"
        }

        fn solve(&self, a: &Matrix, rhs: Option<&Matrix>) -> InvResult<Matrix> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.solve(a, rhs)
        }
    }

    // Hook que falha em um único evento
    struct RejectingHook {
        event: HookEvent,
    }

    impl Hook for RejectingHook {
        fn name(&self) -> &str {
            "rejecting"
        }

        fn handles(&self, event: HookEvent) -> bool {
            event == self.event
        }

        fn execute(&self, _context: &HookContext<'_>) -> InvResult<()> {
            Err(InvError::other("hook rejected"))
        }
    }

    fn m(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    fn counting_resolver() -> (InverseResolver, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = InverseResolver::new(Box::new(CountingSolver::new(calls.clone())));
        (resolver, calls)
    }

    #[test]
    fn test_miss_then_hit() {
        let (mut resolver, calls) = counting_resolver();
        let mut holder = CachedMatrixHolder::new(m(vec![vec![2.0, 0.0], vec![0.0, 2.0]]));

        let first = resolver.invert(&mut holder).unwrap();
        let second = resolver.invert(&mut holder).unwrap();

        assert_eq!(first, m(vec![vec![0.5, 0.0], vec![0.0, 0.5]]));
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let stats = resolver.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.computations, 1);
        assert_eq!(stats.solver_invocations(), 1);
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resolve_stores_in_holder() {
        let mut resolver = InverseResolver::default();
        let mut holder = CachedMatrixHolder::new(m(vec![vec![4.0, 0.0], vec![0.0, 5.0]]));

        let inv = resolver.invert(&mut holder).unwrap();
        assert_eq!(holder.get_inverse(), Some(&inv));
    }

    #[test]
    fn test_set_invalidates_between_resolutions() {
        let (mut resolver, calls) = counting_resolver();
        let mut holder = CachedMatrixHolder::new(Matrix::identity(2));

        resolver.invert(&mut holder).unwrap();
        holder.set(m(vec![vec![2.0, 0.0], vec![0.0, 2.0]]));
        assert!(holder.get_inverse().is_none());

        let inv = resolver.invert(&mut holder).unwrap();
        assert_eq!(inv, m(vec![vec![0.5, 0.0], vec![0.0, 0.5]]));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_singular_is_not_cached() {
        let (mut resolver, calls) = counting_resolver();
        let mut holder = CachedMatrixHolder::new(m(vec![vec![1.0, 2.0], vec![2.0, 4.0]]));

        for _ in 0..3 {
            let err = resolver.invert(&mut holder).unwrap_err();
            assert!(err.is_singular());
            assert!(holder.get_inverse().is_none());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(resolver.stats().failures, 3);
        assert_eq!(resolver.stats().hits, 0);
    }

    #[test]
    fn test_not_square_propagates_dimension_mismatch() {
        let mut resolver = InverseResolver::default();
        let mut holder = CachedMatrixHolder::new(Matrix::zeros(2, 3));

        let err = resolver.invert(&mut holder).unwrap_err();
        assert!(err.is_dimension_mismatch());
        assert!(!holder.is_cached());
    }

    #[test]
    fn test_rhs_forwarded_on_miss() {
        let mut resolver = InverseResolver::default();
        let mut holder = CachedMatrixHolder::new(m(vec![vec![2.0, 1.0], vec![1.0, 3.0]]));
        let b = m(vec![vec![5.0], vec![10.0]]);

        let x = resolver.resolve(&mut holder, Some(&b)).unwrap();
        assert!(x.approx_eq(&m(vec![vec![1.0], vec![3.0]]), 1e-12));
    }

    #[test]
    fn test_rhs_ignored_on_hit() {
        let mut resolver = InverseResolver::default();
        let mut holder = CachedMatrixHolder::new(m(vec![vec![2.0, 0.0], vec![0.0, 2.0]]));

        let inv = resolver.invert(&mut holder).unwrap();
        let b = m(vec![vec![1.0], vec![1.0]]);
        let again = resolver.resolve(&mut holder, Some(&b)).unwrap();

        assert_eq!(inv, again);
    }

    #[test]
    fn test_rhs_wrong_shape() {
        let mut resolver = InverseResolver::default();
        let mut holder = CachedMatrixHolder::new(Matrix::identity(2));
        let b = Matrix::zeros(3, 1);

        let err = resolver.resolve(&mut holder, Some(&b)).unwrap_err();
        assert!(matches!(err, InvError::DimensionMismatch(_)));
    }

    #[test]
    fn test_trusts_set_inverse() {
        let (mut resolver, calls) = counting_resolver();
        let mut holder = CachedMatrixHolder::new(Matrix::identity(2));
        let planted = m(vec![vec![7.0, 7.0], vec![7.0, 7.0]]);

        holder.set_inverse(planted.clone());

        assert_eq!(resolver.invert(&mut holder).unwrap(), planted);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_metrics_hook_observes_resolution() {
        let metrics = Arc::new(MetricsHook::new());
        let mut resolver = InverseResolver::default().with_hooks(HookSystem::new());
        resolver.register_hook(Box::new(metrics.clone()));

        let mut holder = CachedMatrixHolder::new(Matrix::identity(3));
        resolver.invert(&mut holder).unwrap();
        resolver.invert(&mut holder).unwrap();

        holder.set(Matrix::zeros(3, 3));
        assert!(resolver.invert(&mut holder).is_err());

        assert_eq!(metrics.total_hits(), 1);
        assert_eq!(metrics.total_misses(), 2);
        assert_eq!(metrics.total_computations(), 1);
        assert_eq!(metrics.total_failures(), 1);
        assert_eq!(metrics.solver_invocations(), 2);
    }

    #[test]
    fn test_failing_computed_hook_does_not_fail_resolution() {
        let (mut resolver, calls) = counting_resolver();
        resolver.register_hook(Box::new(RejectingHook {
            event: HookEvent::Computed,
        }));
        let mut holder = CachedMatrixHolder::new(m(vec![vec![2.0, 0.0], vec![0.0, 2.0]]));

        let inv = resolver.invert(&mut holder).unwrap();
        assert_eq!(holder.get_inverse(), Some(&inv));

        // O segundo acesso é um hit legítimo de uma resolução bem-sucedida
        assert_eq!(resolver.invert(&mut holder).unwrap(), inv);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failing_hooks_leave_outcome_unchanged() {
        for event in [HookEvent::CacheHit, HookEvent::CacheMiss, HookEvent::Failed] {
            let mut resolver = InverseResolver::default();
            resolver.register_hook(Box::new(RejectingHook { event }));

            let mut holder = CachedMatrixHolder::new(Matrix::identity(2));
            assert_eq!(resolver.invert(&mut holder).unwrap(), Matrix::identity(2));
            assert_eq!(resolver.invert(&mut holder).unwrap(), Matrix::identity(2));

            holder.set(Matrix::zeros(2, 2));
            assert!(resolver.invert(&mut holder).unwrap_err().is_singular());
            assert!(!holder.is_cached());
        }
    }

    #[test]
    fn test_non_finite_is_not_cached() {
        let mut resolver = InverseResolver::default();
        let mut holder =
            CachedMatrixHolder::new(m(vec![vec![f64::INFINITY, 0.0], vec![0.0, 1.0]]));

        let err = resolver.invert(&mut holder).unwrap_err();
        assert!(matches!(err, InvError::NonFiniteEntry { row: 0, col: 0 }));
        assert!(!holder.is_cached());
        assert_eq!(resolver.stats().failures, 1);
    }

    #[test]
    fn test_from_config_uses_configured_solver() {
        let mut config = Config::default_config();
        config.solver.method = SolverMethod::GaussJordan;

        let resolver = InverseResolver::from_config(&config);
        assert_eq!(resolver.solver_name(), GaussJordanSolver::default().name());
    }
}
