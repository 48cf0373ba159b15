//! Matriz densa usada pelo holder e pelos solvers.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{InvError, InvResult};

/// Matriz densa de `f64` armazenada por linhas (row-major).
///
/// Serializa como um array aninhado (`[[1.0, 0.0], [0.0, 1.0]]`), o mesmo
/// formato aceito pelos arquivos da CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Cria uma matriz a partir de linhas.
    ///
    /// Falha com `DimensionMismatch` se as linhas tiverem tamanhos diferentes.
    /// Um vetor vazio produz uma matriz 0x0.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> InvResult<Self> {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        let n_rows = rows.len();

        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(InvError::dimension(format!(
                "linha {} tem {} colunas, esperado {}",
                i,
                row.len(),
                cols
            )));
        }

        Ok(Self {
            rows: n_rows,
            cols,
            data: rows.into_iter().flatten().collect(),
        })
    }

    /// Cria uma matriz de zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Cria a matriz identidade `n x n`.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    /// Número de linhas.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Número de colunas.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Retorna o elemento em `(row, col)`.
    ///
    /// Entra em pânico fora dos limites, como a indexação de slices.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    /// Retorna uma linha como slice.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Converte de volta para linhas aninhadas.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }

    /// Produto matricial `self x other`.
    pub fn mul(&self, other: &Matrix) -> InvResult<Matrix> {
        if self.cols != other.rows {
            return Err(InvError::dimension(format!(
                "produto {}x{} por {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }

        let mut out = Matrix::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.get(i, k);
                if a == 0.0 {
                    continue;
                }
                for j in 0..other.cols {
                    let idx = i * out.cols + j;
                    out.data[idx] += a * other.get(k, j);
                }
            }
        }
        Ok(out)
    }

    /// Compara elemento a elemento dentro de uma tolerância absoluta.
    pub fn approx_eq(&self, other: &Matrix, tolerance: f64) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }

    /// Posição da primeira entrada infinita ou NaN, em ordem de linhas.
    pub fn first_non_finite(&self) -> Option<(usize, usize)> {
        self.data
            .iter()
            .position(|v| !v.is_finite())
            .map(|idx| (idx / self.cols, idx % self.cols))
    }

    /// Maior entrada em módulo; `0.0` para a matriz vazia.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }

    /// Hash SHA256 das dimensões e dos bits de cada elemento.
    ///
    /// Usado apenas para correlacionar registros de log.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update((self.rows as u64).to_le_bytes());
        hasher.update((self.cols as u64).to_le_bytes());
        for value in &self.data {
            hasher.update(value.to_bits().to_le_bytes());
        }
        hex::encode(hasher.finalize())
    }

    /// Formata a matriz com `precision` casas decimais.
    pub fn display_with_precision(&self, precision: usize) -> String {
        let mut out = String::new();
        for r in 0..self.rows {
            let cells: Vec<String> = self
                .row(r)
                .iter()
                .map(|v| format!("{:.*}", precision, v))
                .collect();
            out.push('[');
            out.push_str(&cells.join(", "));
            out.push_str("]\n");
        }
        out
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = InvError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Matrix::from_rows(rows)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(m: Matrix) -> Self {
        m.to_rows()
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            let cells: Vec<String> = self.row(r).iter().map(|v| v.to_string()).collect();
            writeln!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}
