//! Top-level actions and the selector between them

pub mod cleanup;
pub mod deploy;

pub use cleanup::handle_cleanup;
pub use deploy::{handle_deploy, run_deploy};

use crate::config::DeployConfig;
use crate::runner::{Executor, Runner};
use chrono::Local;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Deploy,
    Cleanup,
}

impl Action {
    /// `cleanup` in any case tears down; anything else, or nothing, deploys
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some(arg) if arg.eq_ignore_ascii_case("cleanup") => Action::Cleanup,
            _ => Action::Deploy,
        }
    }
}

/// Run the selected action and return the process exit code
///
/// Elapsed time is reported on every path, including failures.
pub fn execute<E: Executor>(
    action: Action,
    runner: &mut Runner<E>,
    config: &DeployConfig,
) -> i32 {
    let started = Instant::now();
    println!("🥾 d3pl0y {action:?} started at {}", Local::now().to_rfc3339());

    let code = match action {
        Action::Cleanup => handle_cleanup(runner, config),
        Action::Deploy => handle_deploy(runner, config),
    };

    report_elapsed(started);
    code
}

pub fn report_elapsed(started: Instant) {
    println!(
        "Total execution time: {:.2} seconds.",
        started.elapsed().as_secs_f64()
    );
}
