//! k3d cluster lifecycle

use crate::config::DeployConfig;
use crate::error::Result;
use crate::runner::{CommandLine, Executor, Runner};

/// What `ensure_cluster` found or did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterState {
    AlreadyExists,
    Created,
}

fn k3d_cluster(verb: &str, name: &str) -> CommandLine {
    CommandLine::new("k3d").args(["cluster", verb, name])
}

/// Create the cluster unless `k3d cluster get` already finds it
pub fn ensure_cluster<E: Executor>(
    runner: &mut Runner<E>,
    config: &DeployConfig,
) -> Result<ClusterState> {
    println!("\n--- 1. Creating k3d Cluster ---");
    let name = &config.cluster_name;

    if runner.query(&k3d_cluster("get", name))? == 0 {
        println!("✅ Cluster '{name}' already exists. Skipping creation.");
        return Ok(ClusterState::AlreadyExists);
    }

    println!("Cluster '{name}' not found. Creating it now...");
    runner.run_checked(&k3d_cluster("create", name))?;
    println!("✅ Cluster '{name}' created.");
    Ok(ClusterState::Created)
}

/// Delete the cluster; a cluster that is already gone is not an error
pub fn delete_cluster<E: Executor>(runner: &mut Runner<E>, config: &DeployConfig) -> Result<i32> {
    println!("\n--- Cleaning up environment ---");
    println!("Deleting k3d cluster '{}'...", config.cluster_name);
    let code = runner.run_best_effort(&k3d_cluster("delete", &config.cluster_name))?;
    if code != 0 {
        tracing::warn!("k3d cluster delete exited with {code}, ignoring");
    }
    println!("✅ Cleanup complete.");
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeployError;
    use crate::runner::testing::RecordingExecutor;

    #[test]
    fn test_existing_cluster_skips_create() {
        let mut runner = Runner::new(RecordingExecutor::with_tools(&["k3d"]));
        let state = ensure_cluster(&mut runner, &DeployConfig::default()).unwrap();

        assert_eq!(state, ClusterState::AlreadyExists);
        assert_eq!(
            runner.executor().commands(),
            vec!["k3d cluster get main-cluster"]
        );
    }

    #[test]
    fn test_missing_cluster_is_created_once() {
        let executor = RecordingExecutor::with_tools(&["k3d"]).respond("k3d cluster get", 1);
        let mut runner = Runner::new(executor);
        let state = ensure_cluster(&mut runner, &DeployConfig::default()).unwrap();

        assert_eq!(state, ClusterState::Created);
        let calls = &runner.executor().calls;
        assert_eq!(
            runner.executor().commands(),
            vec!["k3d cluster get main-cluster", "k3d cluster create main-cluster"]
        );
        assert!(!calls[0].stream);
        assert!(calls[1].stream);
    }

    #[test]
    fn test_create_failure_aborts_with_its_code() {
        let executor = RecordingExecutor::with_tools(&["k3d"])
            .respond("k3d cluster get", 1)
            .respond("k3d cluster create", 5);
        let mut runner = Runner::new(executor);
        let err = ensure_cluster(&mut runner, &DeployConfig::default()).unwrap_err();
        assert!(matches!(err, DeployError::CommandFailed { code: 5, .. }));
    }

    #[test]
    fn test_delete_tolerates_failure() {
        let executor = RecordingExecutor::with_tools(&["k3d"]).respond("k3d cluster delete", 1);
        let mut runner = Runner::new(executor);
        let code = delete_cluster(&mut runner, &DeployConfig::default()).unwrap();
        assert_eq!(code, 1);
        assert_eq!(
            runner.executor().commands(),
            vec!["k3d cluster delete main-cluster"]
        );
    }
}
