//! Interface de linha de comando do invcache.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// invcache - inversa de matriz com cache de slot único.
#[derive(Parser, Debug)]
#[command(name = "invcache")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Arquivo de configuração.
    #[arg(short, long, default_value = "invcache.toml")]
    pub config: PathBuf,

    /// Modo verbose.
    #[arg(short, long)]
    pub verbose: bool,

    /// Modo silencioso.
    #[arg(short, long)]
    pub quiet: bool,

    /// Comando a executar.
    #[command(subcommand)]
    pub command: Commands,
}

/// Comandos disponíveis.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inicializa configuração no diretório atual.
    Init {
        /// Diretório de destino (padrão: diretório atual).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Inverte a matriz de um arquivo JSON.
    Invert {
        /// Arquivo com a matriz (`[[a, b], [c, d]]`).
        input: PathBuf,

        /// Número de resoluções sobre o mesmo holder (mínimo 1).
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        repeat: u64,
    },

    /// Resolve `A X = B` com A e B em arquivos JSON.
    Solve {
        /// Arquivo com a matriz A.
        input: PathBuf,

        /// Arquivo com o lado direito B.
        #[arg(long)]
        rhs: PathBuf,
    },

    /// Executa os cenários de demonstração do cache.
    Demo,

    /// Mostra a configuração efetiva.
    Config,

    /// Mostra versão.
    Version,
}
