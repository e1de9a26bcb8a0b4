use crate::config::DeployConfig;
use crate::runner::{Executor, Runner};
use crate::steps::delete_cluster;

/// Tear down the cluster
///
/// Only a tool that cannot be spawned at all makes this fail; whatever
/// `k3d cluster delete` itself returns is ignored.
pub fn handle_cleanup<E: Executor>(runner: &mut Runner<E>, config: &DeployConfig) -> i32 {
    match delete_cluster(runner, config) {
        Ok(_) => 0,
        Err(e) => {
            println!("\nScript exited with code {}", e.exit_code());
            e.exit_code()
        }
    }
}
