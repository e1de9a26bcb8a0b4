//! Monitoring stack (kube-prometheus-stack) via Helm

use crate::config::{DeployConfig, MonitoringConfig};
use crate::error::Result;
use crate::runner::{CommandLine, Executor, Runner};

fn helm() -> CommandLine {
    CommandLine::new("helm")
}

/// `helm upgrade --install` line for the configured release
pub fn upgrade_install_command(monitoring: &MonitoringConfig, namespace: &str) -> CommandLine {
    let mut cmd = helm()
        .args(["upgrade", "--install"])
        .args([monitoring.release.as_str(), monitoring.chart.as_str()])
        .args(["--namespace", namespace, "--create-namespace"]);
    for value in &monitoring.set {
        cmd = cmd.args(["--set", value.as_str()]);
    }
    cmd
}

/// Register the chart repo, refresh indexes and install or upgrade the chart
pub fn deploy_monitoring_stack<E: Executor>(
    runner: &mut Runner<E>,
    config: &DeployConfig,
) -> Result<()> {
    println!("\n--- 3. Deploying Monitoring Stack (Prometheus & Grafana) ---");
    let monitoring = &config.monitoring;

    println!("Adding Prometheus Helm repository...");
    // Fails when the repo entry already exists, which is fine
    let add = helm().args([
        "repo",
        "add",
        monitoring.repo_name.as_str(),
        monitoring.repo_url.as_str(),
    ]);
    if runner.run_best_effort(&add)? != 0 {
        tracing::info!("helm repo add {} returned non-zero, continuing", monitoring.repo_name);
    }

    println!("Updating Helm repositories...");
    runner.run_checked(&helm().args(["repo", "update"]))?;

    println!("Installing or upgrading {}...", monitoring.release);
    runner.run_checked(&upgrade_install_command(monitoring, &config.namespace))?;
    println!("✅ Monitoring stack deployed successfully.");
    Ok(())
}
