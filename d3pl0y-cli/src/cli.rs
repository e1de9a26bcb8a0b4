//! Command-line surface

use crate::commands::Action;
use crate::config::DeployConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "d3pl0y", version)]
#[command(about = "Provision a local k3d cluster, install monitoring and deploy the app")]
pub struct Cli {
    /// `cleanup` deletes the cluster; anything else (or nothing) deploys
    #[arg(allow_hyphen_values = true)]
    pub action: Option<String>,

    /// Config file (default: ./d3pl0y.toml when present)
    #[arg(short, long, env = "D3PL0Y_CONFIG")]
    pub config: Option<PathBuf>,

    /// Cluster name override
    #[arg(long, env = "D3PL0Y_CLUSTER")]
    pub cluster: Option<String>,

    /// Namespace override
    #[arg(long, env = "D3PL0Y_NAMESPACE")]
    pub namespace: Option<String>,

    /// Manifests directory override
    #[arg(long, env = "D3PL0Y_MANIFESTS")]
    pub manifests: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn action(&self) -> Action {
        Action::from_arg(self.action.as_deref())
    }

    /// Flags and env beat the config file
    pub fn apply_overrides(&self, config: &mut DeployConfig) {
        if let Some(cluster) = &self.cluster {
            config.cluster_name.clone_from(cluster);
        }
        if let Some(namespace) = &self.namespace {
            config.namespace.clone_from(namespace);
        }
        if let Some(manifests) = &self.manifests {
            config.manifests_path.clone_from(manifests);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_action() {
        let cli = Cli::try_parse_from(["d3pl0y", "CLEANUP"]).unwrap();
        assert_eq!(cli.action(), Action::Cleanup);

        let cli = Cli::try_parse_from(["d3pl0y"]).unwrap();
        assert_eq!(cli.action(), Action::Deploy);

        let cli = Cli::try_parse_from(["d3pl0y", "whatever"]).unwrap();
        assert_eq!(cli.action(), Action::Deploy);
    }

    #[test]
    fn test_unknown_dash_argument_selects_deploy() {
        let cli = Cli::try_parse_from(["d3pl0y", "-x"]).unwrap();
        assert_eq!(cli.action.as_deref(), Some("-x"));
        assert_eq!(cli.action(), Action::Deploy);

        let cli = Cli::try_parse_from(["d3pl0y", "--bogus"]).unwrap();
        assert_eq!(cli.action(), Action::Deploy);
    }

    #[test]
    fn test_known_flags_still_parse_around_action() {
        let cli = Cli::try_parse_from(["d3pl0y", "-v", "cleanup"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.action(), Action::Cleanup);

        let cli = Cli::try_parse_from(["d3pl0y", "cleanup", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.action(), Action::Cleanup);

        let cli = Cli::try_parse_from(["d3pl0y", "--namespace", "apps"]).unwrap();
        assert_eq!(cli.namespace.as_deref(), Some("apps"));
        assert_eq!(cli.action, None);
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let cli = Cli::try_parse_from([
            "d3pl0y",
            "--cluster",
            "dev",
            "--manifests",
            "deploy/k8s",
        ])
        .unwrap();
        let mut config = DeployConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.cluster_name, "dev");
        assert_eq!(config.manifests_path, "deploy/k8s");
        assert_eq!(config.namespace, "monitoring-app");
    }
}
