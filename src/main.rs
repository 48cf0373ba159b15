use clap::Parser;
use invcache::cli::{Cli, Commands};
use invcache::types::config::Config;
use invcache::InvResult;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> InvResult<()> {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let config = if cli.config.exists() {
        Config::load(&cli.config).unwrap_or_else(|_| Config::default_config())
    } else {
        Config::default_config()
    };

    // Determine log level: CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("invcache={}", log_level)
            .parse()
            .unwrap_or_else(|_| "invcache=info".parse().expect("fallback directive is valid")),
    );

    // Logs go to stderr so stdout carries only results
    if config.general.log_format == "json" {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }

    tracing::debug!("Configuration loaded from: {}", cli.config.display());

    match cli.command {
        Commands::Init { path } => {
            invcache::cli::commands::init(path)?;
        }
        Commands::Invert { input, repeat } => {
            invcache::cli::commands::invert(&input, repeat, &config)?;
        }
        Commands::Solve { input, rhs } => {
            invcache::cli::commands::solve(&input, &rhs, &config)?;
        }
        Commands::Demo => {
            invcache::cli::commands::demo(&config)?;
        }
        Commands::Config => {
            invcache::cli::commands::config_cmd(&config)?;
        }
        Commands::Version => {
            invcache::cli::commands::version();
        }
    }

    Ok(())
}
