//! Deploy command
//!
//! Runs the steps in fixed order and stops at the first one that aborts:
//! - Check prerequisites
//! - Create or reuse the k3d cluster
//! - Import the app image
//! - Install or upgrade the monitoring stack
//! - Create the namespace and apply manifests

use crate::bootstrap::check_prerequisites;
use crate::config::DeployConfig;
use crate::error::Result;
use crate::runner::{Executor, Runner};
use crate::steps::{deploy_application, deploy_monitoring_stack, ensure_cluster, import_image};

/// Run the full deploy sequence
pub fn run_deploy<E: Executor>(runner: &mut Runner<E>, config: &DeployConfig) -> Result<()> {
    check_prerequisites(runner, &config.required_tools)?;
    ensure_cluster(runner, config)?;
    import_image(runner, config)?;
    deploy_monitoring_stack(runner, config)?;
    deploy_application(runner, config)?;
    Ok(())
}

/// Run the deploy and turn the outcome into a process exit code
pub fn handle_deploy<E: Executor>(runner: &mut Runner<E>, config: &DeployConfig) -> i32 {
    match run_deploy(runner, config) {
        Ok(()) => {
            println!("\n🎉 Deployment finished successfully! 🎉");
            println!("To clean up the environment, run: d3pl0y cleanup");
            0
        }
        Err(e) if e.is_unexpected() => {
            println!("\nAn unexpected error occurred: {e}");
            e.exit_code()
        }
        Err(e) => {
            tracing::debug!("deploy aborted: {e}");
            println!("\nScript exited with code {}", e.exit_code());
            e.exit_code()
        }
    }
}
