//! Holder de matriz com inversa em cache.

use chrono::{DateTime, Utc};

use crate::types::matrix::Matrix;

/// Inversa em cache.
#[derive(Debug, Clone)]
pub struct CachedInverse {
    /// Resultado armazenado.
    pub inverse: Matrix,

    /// Momento em que foi armazenado.
    pub computed_at: DateTime<Utc>,
}

impl CachedInverse {
    /// Cria uma nova entrada de cache.
    pub fn new(inverse: Matrix) -> Self {
        Self {
            inverse,
            computed_at: Utc::now(),
        }
    }
}

/// Guarda uma matriz e, opcionalmente, sua inversa já calculada.
///
/// O holder não valida nada: a matriz pode não ser quadrada ou inversível,
/// o que só é descoberto na resolução. `set` é o único gatilho de
/// invalidação, e como a matriz só é exposta por referência compartilhada,
/// nenhuma alteração escapa dele.
#[derive(Debug)]
pub struct CachedMatrixHolder {
    id: String,
    value: Matrix,
    cached: Option<CachedInverse>,
}

impl CachedMatrixHolder {
    /// Cria um holder com a matriz inicial e sem inversa em cache.
    pub fn new(initial: Matrix) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            value: initial,
            cached: None,
        }
    }

    /// Identificador usado nos registros de log.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Substitui a matriz e descarta a inversa em cache.
    pub fn set(&mut self, new_value: Matrix) {
        self.value = new_value;
        self.cached = None;
    }

    /// Retorna a matriz atual.
    pub fn get(&self) -> &Matrix {
        &self.value
    }

    /// Sobrescreve a inversa em cache.
    ///
    /// Não verifica que `inverse` é de fato a inversa da matriz atual; quem
    /// chama é responsável por isso. Revalidar aqui anularia o ganho do cache.
    pub fn set_inverse(&mut self, inverse: Matrix) {
        self.cached = Some(CachedInverse::new(inverse));
    }

    /// Retorna a inversa em cache, se houver.
    pub fn get_inverse(&self) -> Option<&Matrix> {
        self.cached.as_ref().map(|c| &c.inverse)
    }

    /// Retorna a entrada de cache completa (inversa e momento do cálculo).
    pub fn cached(&self) -> Option<&CachedInverse> {
        self.cached.as_ref()
    }

    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }
}

impl From<Matrix> for CachedMatrixHolder {
    fn from(initial: Matrix) -> Self {
        Self::new(initial)
    }
}
