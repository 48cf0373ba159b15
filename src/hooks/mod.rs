//! Sistema de hooks do invcache.
//!
//! Hooks observam a resolução da inversa em pontos específicos:
//!
//! - `cache_hit`: A inversa em cache foi devolvida
//! - `cache_miss`: O cache estava vazio e o solver será chamado
//! - `computed`: O solver calculou e o resultado foi armazenado
//! - `failed`: O solver falhou; o cache continua vazio
//!
//! Hooks são apenas observacionais e não alteram o resultado: o resolvedor
//! registra e ignora erros devolvidos por eles.

mod builtin;

pub use builtin::{LoggingHook, Metrics, MetricsHook};

use std::sync::Arc;

use crate::types::matrix::Matrix;
use crate::{InvError, InvResult};

// ═══════════════════════════════════════════════════════════════════════════
// Tipos de eventos
// ═══════════════════════════════════════════════════════════════════════════

/// Evento que dispara um hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    /// Inversa devolvida do cache.
    CacheHit,

    /// Cache vazio, cálculo necessário.
    CacheMiss,

    /// Inversa calculada e armazenada.
    Computed,

    /// Cálculo falhou.
    Failed,
}

impl std::fmt::Display for HookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HookEvent::CacheHit => write!(f, "cache_hit"),
            HookEvent::CacheMiss => write!(f, "cache_miss"),
            HookEvent::Computed => write!(f, "computed"),
            HookEvent::Failed => write!(f, "failed"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Contexto de hooks
// ═══════════════════════════════════════════════════════════════════════════

/// Contexto passado para hooks.
pub enum HookContext<'a> {
    /// Contexto para cache_hit.
    CacheHit {
        /// Identificador do holder.
        holder_id: &'a str,
        /// Inversa devolvida.
        inverse: &'a Matrix,
    },

    /// Contexto para cache_miss.
    CacheMiss {
        /// Identificador do holder.
        holder_id: &'a str,
        /// Matriz que será invertida.
        value: &'a Matrix,
    },

    /// Contexto para computed.
    Computed {
        /// Identificador do holder.
        holder_id: &'a str,
        /// Nome do solver usado.
        solver: &'a str,
        /// Resultado armazenado.
        inverse: &'a Matrix,
    },

    /// Contexto para failed.
    Failed {
        /// Identificador do holder.
        holder_id: &'a str,
        /// Nome do solver usado.
        solver: &'a str,
        /// Erro que será propagado.
        error: &'a InvError,
    },
}

impl<'a> HookContext<'a> {
    /// Retorna o evento correspondente ao contexto.
    pub fn event(&self) -> HookEvent {
        match self {
            HookContext::CacheHit { .. } => HookEvent::CacheHit,
            HookContext::CacheMiss { .. } => HookEvent::CacheMiss,
            HookContext::Computed { .. } => HookEvent::Computed,
            HookContext::Failed { .. } => HookEvent::Failed,
        }
    }

    /// Retorna o holder envolvido.
    pub fn holder_id(&self) -> &'a str {
        match self {
            HookContext::CacheHit { holder_id, .. }
            | HookContext::CacheMiss { holder_id, .. }
            | HookContext::Computed { holder_id, .. }
            | HookContext::Failed { holder_id, .. } => *holder_id,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait Hook
// ═══════════════════════════════════════════════════════════════════════════

/// Trait para hooks customizáveis.
pub trait Hook: Send + Sync {
    /// Nome do hook.
    fn name(&self) -> &str;

    /// Indica se o hook deve ser executado para o evento.
    fn handles(&self, _event: HookEvent) -> bool {
        true
    }

    /// Executa o hook.
    fn execute(&self, context: &HookContext<'_>) -> InvResult<()>;
}

/// Permite registrar um hook compartilhado e continuar lendo seu estado.
impl<H: Hook + ?Sized> Hook for Arc<H> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn handles(&self, event: HookEvent) -> bool {
        (**self).handles(event)
    }

    fn execute(&self, context: &HookContext<'_>) -> InvResult<()> {
        (**self).execute(context)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Sistema de hooks
// ═══════════════════════════════════════════════════════════════════════════

/// Gerenciador de hooks.
pub struct HookSystem {
    hooks: Vec<Box<dyn Hook>>,
}

impl HookSystem {
    /// Cria um novo sistema de hooks vazio.
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Cria um sistema com hooks padrão (logging).
    pub fn with_defaults() -> Self {
        let mut system = Self::new();
        system.register(Box::new(LoggingHook));
        system
    }

    /// Registra um hook.
    pub fn register(&mut self, hook: Box<dyn Hook>) {
        tracing::debug!(hook_name = hook.name(), "Registering hook");
        self.hooks.push(hook);
    }

    /// Executa, em ordem de registro, os hooks interessados no evento.
    ///
    /// O primeiro erro interrompe a cadeia e é propagado.
    pub fn run(&self, context: &HookContext<'_>) -> InvResult<()> {
        let event = context.event();
        for hook in self.hooks.iter().filter(|h| h.handles(event)) {
            hook.execute(context)?;
        }
        Ok(())
    }

    /// Retorna o número total de hooks registrados.
    pub fn count(&self) -> usize {
        self.hooks.len()
    }

    /// Retorna o número de hooks para um evento específico.
    pub fn count_for_event(&self, event: HookEvent) -> usize {
        self.hooks.iter().filter(|h| h.handles(event)).count()
    }
}

impl Default for HookSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Hook de teste que conta execuções
    struct CountingHook {
        name: String,
        event: HookEvent,
        count: Arc<AtomicUsize>,
    }

    impl CountingHook {
        fn new(name: &str, event: HookEvent, count: Arc<AtomicUsize>) -> Self {
            Self {
                name: name.to_string(),
                event,
                count,
            }
        }
    }

    impl Hook for CountingHook {
        fn name(&self) -> &str {
            &self.name
        }

        fn handles(&self, event: HookEvent) -> bool {
            event == self.event
        }

        fn execute(&self, _context: &HookContext<'_>) -> InvResult<()> {
            self.count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingHook;

    impl Hook for FailingHook {
        fn name(&self) -> &str {
            "failing"
        }

        fn execute(&self, _context: &HookContext<'_>) -> InvResult<()> {
            Err(InvError::other("hook failed"))
        }
    }

    #[test]
    fn test_hook_system_new() {
        let system = HookSystem::new();
        assert_eq!(system.count(), 0);
    }

    #[test]
    fn test_hook_system_with_defaults() {
        let system = HookSystem::with_defaults();
        assert!(system.count() > 0);
        assert_eq!(system.count_for_event(HookEvent::CacheHit), 1);
    }

    #[test]
    fn test_hook_registration() {
        let mut system = HookSystem::new();
        let count = Arc::new(AtomicUsize::new(0));

        system.register(Box::new(CountingHook::new(
            "test",
            HookEvent::CacheHit,
            count,
        )));

        assert_eq!(system.count_for_event(HookEvent::CacheHit), 1);
        assert_eq!(system.count_for_event(HookEvent::CacheMiss), 0);
    }

    #[test]
    fn test_run_only_matching_hooks() {
        let mut system = HookSystem::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let misses = Arc::new(AtomicUsize::new(0));

        system.register(Box::new(CountingHook::new(
            "hits",
            HookEvent::CacheHit,
            hits.clone(),
        )));
        system.register(Box::new(CountingHook::new(
            "misses",
            HookEvent::CacheMiss,
            misses.clone(),
        )));

        let value = Matrix::identity(2);
        system
            .run(&HookContext::CacheMiss {
                holder_id: "h-1",
                value: &value,
            })
            .unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(misses.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failing_hook_stops_chain() {
        let mut system = HookSystem::new();
        let count = Arc::new(AtomicUsize::new(0));

        system.register(Box::new(FailingHook));
        system.register(Box::new(CountingHook::new(
            "after",
            HookEvent::CacheHit,
            count.clone(),
        )));

        let inverse = Matrix::identity(2);
        let result = system.run(&HookContext::CacheHit {
            holder_id: "h-1",
            inverse: &inverse,
        });

        assert!(result.is_err());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_shared_hook_via_arc() {
        let mut system = HookSystem::new();
        let count = Arc::new(AtomicUsize::new(0));
        let hook = Arc::new(CountingHook::new("shared", HookEvent::Computed, count));

        system.register(Box::new(hook.clone()));

        let inverse = Matrix::identity(2);
        system
            .run(&HookContext::Computed {
                holder_id: "h-1",
                solver: "gauss_jordan",
                inverse: &inverse,
            })
            .unwrap();

        assert_eq!(hook.count.load(Ordering::SeqCst), 1);
        assert_eq!(system.count_for_event(HookEvent::Computed), 1);
    }

    #[test]
    fn test_hook_event_display() {
        assert_eq!(format!("{}", HookEvent::CacheHit), "cache_hit");
        assert_eq!(format!("{}", HookEvent::CacheMiss), "cache_miss");
        assert_eq!(format!("{}", HookEvent::Computed), "computed");
        assert_eq!(format!("{}", HookEvent::Failed), "failed");
    }

    #[test]
    fn test_hook_context_event() {
        let m = Matrix::identity(2);
        let err = InvError::SingularMatrix { column: 0 };

        let ctx = HookContext::CacheHit {
            holder_id: "a",
            inverse: &m,
        };
        assert_eq!(ctx.event(), HookEvent::CacheHit);
        assert_eq!(ctx.holder_id(), "a");

        let ctx = HookContext::CacheMiss {
            holder_id: "b",
            value: &m,
        };
        assert_eq!(ctx.event(), HookEvent::CacheMiss);

        let ctx = HookContext::Computed {
            holder_id: "c",
            solver: "lu",
            inverse: &m,
        };
        assert_eq!(ctx.event(), HookEvent::Computed);

        let ctx = HookContext::Failed {
            holder_id: "d",
            solver: "lu",
            error: &err,
        };
        assert_eq!(ctx.event(), HookEvent::Failed);
        assert_eq!(ctx.holder_id(), "d");
    }
}
