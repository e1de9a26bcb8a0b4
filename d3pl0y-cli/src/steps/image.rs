use crate::config::DeployConfig;
use crate::error::Result;
use crate::runner::{CommandLine, Executor, Runner};

/// Import the locally built image into every node of the cluster
///
/// `k3d image import` overwrites an existing copy, so this always runs.
pub fn import_image<E: Executor>(runner: &mut Runner<E>, config: &DeployConfig) -> Result<()> {
    println!("\n--- 2. Importing Docker Image into k3d Cluster ---");
    let import = CommandLine::new("k3d")
        .args(["image", "import"])
        .arg(config.image_ref())
        .args(["-c", config.cluster_name.as_str()]);
    runner.run_checked(&import)?;
    Ok(())
}
