//! Tipos de erro do invcache.

use thiserror::Error;

/// Tipo de resultado padrão do invcache.
pub type InvResult<T> = Result<T, InvError>;

/// Erros possíveis no invcache.
///
/// Apenas a etapa de cálculo da resolução produz `SingularMatrix`,
/// `DimensionMismatch` ou `NonFiniteEntry`; as operações do holder nunca falham.
#[derive(Error, Debug)]
pub enum InvError {
    #[error("Matriz singular: pivô nulo na coluna {column}")]
    SingularMatrix { column: usize },

    #[error("Dimensões incompatíveis: {0}")]
    DimensionMismatch(String),

    #[error("Entrada não finita na posição ({row}, {col})")]
    NonFiniteEntry { row: usize, col: usize },

    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro ao parsear TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Erro ao serializar TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl InvError {
    /// Cria um erro genérico.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }

    /// Cria um erro de configuração.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Cria um erro de dimensões incompatíveis.
    pub fn dimension<S: Into<String>>(msg: S) -> Self {
        Self::DimensionMismatch(msg.into())
    }

    /// Indica se o erro veio de uma matriz sem inversa.
    pub fn is_singular(&self) -> bool {
        matches!(self, Self::SingularMatrix { .. })
    }

    /// Indica se o erro veio de formatos incompatíveis.
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, Self::DimensionMismatch(_))
    }
}
