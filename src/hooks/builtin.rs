//! Hooks padrão do invcache.
//!
//! Este módulo contém hooks que vêm pré-configurados:
//! - `LoggingHook`: Registra cada evento de resolução no log
//! - `MetricsHook`: Conta acertos, faltas, cálculos e falhas

use std::sync::atomic::{AtomicU64, Ordering};

use crate::InvResult;

use super::{Hook, HookContext};

// ═══════════════════════════════════════════════════════════════════════════
// LoggingHook
// ═══════════════════════════════════════════════════════════════════════════

/// Hook que registra eventos de resolução no log (tracing, nível debug).
#[derive(Debug, Default)]
pub struct LoggingHook;

impl LoggingHook {
    /// Cria um novo LoggingHook.
    pub fn new() -> Self {
        Self
    }
}

impl Hook for LoggingHook {
    fn name(&self) -> &str {
        "logging"
    }

    fn execute(&self, context: &HookContext<'_>) -> InvResult<()> {
        match context {
            HookContext::CacheHit { holder_id, inverse } => {
                tracing::debug!(
                    holder_id = %holder_id,
                    rows = inverse.rows(),
                    "Cache hit"
                );
            }
            HookContext::CacheMiss { holder_id, value } => {
                tracing::debug!(
                    holder_id = %holder_id,
                    rows = value.rows(),
                    cols = value.cols(),
                    fingerprint = %value.fingerprint(),
                    "Cache miss"
                );
            }
            HookContext::Computed {
                holder_id,
                solver,
                inverse,
            } => {
                tracing::debug!(
                    holder_id = %holder_id,
                    solver = %solver,
                    rows = inverse.rows(),
                    cols = inverse.cols(),
                    "Inverse stored"
                );
            }
            HookContext::Failed {
                holder_id,
                solver,
                error,
            } => {
                tracing::warn!(
                    holder_id = %holder_id,
                    solver = %solver,
                    error = %error,
                    "Inverse computation failed"
                );
            }
        }

        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// MetricsHook
// ═══════════════════════════════════════════════════════════════════════════

/// Hook que coleta métricas de resolução.
///
/// `computations` conta invocações bem-sucedidas do solver; somado a
/// `failures` dá o total de vezes em que o solver foi chamado.
#[derive(Debug, Default)]
pub struct MetricsHook {
    hits: AtomicU64,
    misses: AtomicU64,
    computations: AtomicU64,
    failures: AtomicU64,
}

impl MetricsHook {
    /// Cria um novo MetricsHook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retorna o total de acertos.
    pub fn total_hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Retorna o total de faltas.
    pub fn total_misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Retorna o total de cálculos bem-sucedidos.
    pub fn total_computations(&self) -> u64 {
        self.computations.load(Ordering::Relaxed)
    }

    /// Retorna o total de falhas.
    pub fn total_failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Total de invocações do solver.
    pub fn solver_invocations(&self) -> u64 {
        self.total_computations() + self.total_failures()
    }

    /// Retorna a taxa de acerto (hits / resoluções).
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_hits() + self.total_misses();
        if total == 0 {
            0.0
        } else {
            self.total_hits() as f64 / total as f64
        }
    }

    /// Retorna as métricas em formato estruturado.
    pub fn metrics(&self) -> Metrics {
        Metrics {
            hits: self.total_hits(),
            misses: self.total_misses(),
            computations: self.total_computations(),
            failures: self.total_failures(),
            hit_rate: self.hit_rate(),
        }
    }
}

/// Métricas coletadas pelo MetricsHook.
#[derive(Debug, Clone)]
pub struct Metrics {
    pub hits: u64,
    pub misses: u64,
    pub computations: u64,
    pub failures: u64,
    pub hit_rate: f64,
}

impl Hook for MetricsHook {
    fn name(&self) -> &str {
        "metrics"
    }

    fn execute(&self, context: &HookContext<'_>) -> InvResult<()> {
        let counter = match context {
            HookContext::CacheHit { .. } => &self.hits,
            HookContext::CacheMiss { .. } => &self.misses,
            HookContext::Computed { .. } => &self.computations,
            HookContext::Failed { .. } => &self.failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        Ok(())
    }
}
