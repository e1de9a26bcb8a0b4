use anyhow::{Context, Result};
use clap::Parser;
use d3pl0y_cli::cli::Cli;
use d3pl0y_cli::commands::report_elapsed;
use d3pl0y_cli::{DeployConfig, Runner, SystemExecutor, execute};
use std::process::exit;
use std::time::Instant;

fn run(cli: &Cli) -> Result<i32> {
    let mut config = DeployConfig::resolve(cli.config.as_deref())
        .context("Failed to load deploy configuration")?;
    cli.apply_overrides(&mut config);
    tracing::debug!(?config, "resolved configuration");

    let mut runner = Runner::new(SystemExecutor);
    Ok(execute(cli.action(), &mut runner, &config))
}

fn main() {
    let started = Instant::now();
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    // Config is resolved before either branch starts, so neither ran
    let code = run(&cli).unwrap_or_else(|e| {
        eprintln!("❌ {e:#}");
        report_elapsed(started);
        1
    });
    exit(code);
}
