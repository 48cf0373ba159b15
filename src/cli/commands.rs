//! Implementação dos comandos CLI do invcache.

use std::path::{Path, PathBuf};

use crate::cache::{CachedMatrixHolder, InverseResolver, ResolverStats};
use crate::types::config::Config;
use crate::types::matrix::Matrix;
use crate::{InvError, InvResult};

/// Initializes configuration in the specified directory.
pub fn init(path: Option<PathBuf>) -> InvResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    // Create directory if it doesn't exist
    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join("invcache.toml");

    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        return Ok(());
    }

    let config = Config::default_config();
    config.save(&config_path)?;

    println!("invcache initialized successfully!");
    println!("Configuration created at: {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Write a matrix as JSON: echo '[[2,0],[0,2]]' > a.json");
    println!("  2. Invert it: invcache invert a.json");

    Ok(())
}

/// Lê uma matriz JSON de um arquivo.
pub fn read_matrix(path: &Path) -> InvResult<Matrix> {
    let content = std::fs::read_to_string(path)?;
    let matrix: Matrix = serde_json::from_str(&content)?;
    tracing::debug!(
        path = %path.display(),
        rows = matrix.rows(),
        cols = matrix.cols(),
        "Matrix loaded"
    );
    Ok(matrix)
}

/// Inverte a matriz de `input`, resolvendo `repeat` vezes sobre o mesmo holder.
pub fn invert(input: &Path, repeat: u64, config: &Config) -> InvResult<()> {
    if repeat == 0 {
        return Err(InvError::config("repeat must be at least 1"));
    }

    let mut holder = CachedMatrixHolder::new(read_matrix(input)?);
    let mut resolver = InverseResolver::from_config(config);

    let mut inverse = resolver.invert(&mut holder)?;
    for _ in 1..repeat {
        inverse = resolver.invert(&mut holder)?;
    }

    print_result(&inverse, Some(resolver.stats()), config)
}

/// Resolve `A X = B` com `B` lido de `rhs`.
pub fn solve(input: &Path, rhs: &Path, config: &Config) -> InvResult<()> {
    let mut holder = CachedMatrixHolder::new(read_matrix(input)?);
    let b = read_matrix(rhs)?;
    let mut resolver = InverseResolver::from_config(config);

    let x = resolver.resolve(&mut holder, Some(&b))?;
    print_result(&x, None, config)
}

fn print_result(matrix: &Matrix, stats: Option<ResolverStats>, config: &Config) -> InvResult<()> {
    if config.output.format == "json" {
        let mut value = serde_json::json!({ "result": matrix });
        if let Some(s) = stats {
            value["stats"] = serde_json::json!({
                "hits": s.hits,
                "misses": s.misses,
                "solver_invocations": s.solver_invocations(),
            });
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print!("{}", matrix.display_with_precision(config.output.precision));
    if let Some(s) = stats {
        println!();
        println!(
            "cache: {} hit(s), {} miss(es), {} solver invocation(s)",
            s.hits,
            s.misses,
            s.solver_invocations()
        );
    }
    Ok(())
}

/// Executa os três cenários de demonstração.
pub fn demo(config: &Config) -> InvResult<()> {
    let precision = config.output.precision;
    let mut resolver = InverseResolver::from_config(config);

    println!("Scenario 1: repeated resolution hits the cache");
    let mut holder = CachedMatrixHolder::new(Matrix::from_rows(vec![
        vec![2.0, 0.0],
        vec![0.0, 2.0],
    ])?);
    let first = resolver.invert(&mut holder)?;
    let before = resolver.stats().solver_invocations();
    let second = resolver.invert(&mut holder)?;
    let extra = resolver.stats().solver_invocations() - before;
    print!("{}", first.display_with_precision(precision));
    println!(
        "  identical on second call: {}, extra solver invocations: {}",
        first == second,
        extra
    );

    println!();
    println!("Scenario 2: singular matrix");
    let mut holder = CachedMatrixHolder::new(Matrix::from_rows(vec![
        vec![1.0, 2.0],
        vec![2.0, 4.0],
    ])?);
    match resolver.invert(&mut holder) {
        Ok(inv) => print!("{}", inv.display_with_precision(precision)),
        Err(e) => println!("  error: {}", e),
    }

    println!();
    println!("Scenario 3: set() invalidates the cached inverse");
    let mut holder = CachedMatrixHolder::new(Matrix::identity(2));
    resolver.invert(&mut holder)?;
    holder.set(Matrix::from_rows(vec![vec![2.0, 0.0], vec![0.0, 2.0]])?);
    let inv = resolver.invert(&mut holder)?;
    print!("{}", inv.display_with_precision(precision));

    Ok(())
}

/// Mostra a configuração efetiva como TOML.
pub fn config_cmd(config: &Config) -> InvResult<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

/// Mostra versão.
pub fn version() {
    println!("invcache {}", env!("CARGO_PKG_VERSION"));
}
