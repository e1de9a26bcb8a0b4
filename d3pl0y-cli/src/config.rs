//! Deployment configuration
//!
//! Reads an optional `d3pl0y.toml` with a `[deploy]` table. Every key is
//! optional and falls back to the built-in defaults below.

use crate::error::{ParseConfigSnafu, ReadConfigSnafu, Result};
use serde::Deserialize;
use snafu::ResultExt;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "d3pl0y.toml";

/// Top-level structure matching d3pl0y.toml
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    deploy: DeployConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeployConfig {
    pub cluster_name: String,
    pub namespace: String,
    pub image_name: String,
    pub image_tag: String,
    pub manifests_path: String,
    /// Checked in order; the first one missing aborts the deploy
    pub required_tools: Vec<String>,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonitoringConfig {
    pub repo_name: String,
    pub repo_url: String,
    pub release: String,
    pub chart: String,
    /// Passed to helm as repeated `--set` values
    pub set: Vec<String>,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            cluster_name: "main-cluster".to_string(),
            namespace: "monitoring-app".to_string(),
            image_name: "python-metrics-app".to_string(),
            image_tag: "latest".to_string(),
            manifests_path: "k8s/".to_string(),
            required_tools: ["docker", "k3d", "kubectl", "helm"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            monitoring: MonitoringConfig::default(),
        }
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            repo_name: "prometheus-community".to_string(),
            repo_url: "https://prometheus-community.github.io/helm-charts".to_string(),
            release: "prometheus".to_string(),
            chart: "prometheus-community/kube-prometheus-stack".to_string(),
            // Prometheus only picks up ServiceMonitors labelled with the release name
            set: vec![
                "prometheus.prometheusSpec.serviceMonitorSelector.matchLabels.release=prometheus"
                    .to_string(),
            ],
        }
    }
}

impl DeployConfig {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context(ReadConfigSnafu { path })?;
        Self::from_toml(&content, path)
    }

    fn from_toml(content: &str, path: &Path) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content).context(ParseConfigSnafu { path })?;
        Ok(file.deploy)
    }

    /// Resolve the config to use for this run
    ///
    /// An explicit path must exist. Without one, `d3pl0y.toml` in the working
    /// directory is used if present, otherwise the defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(&expand_path(path)),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    tracing::debug!("Using config from {}", fallback.display());
                    Self::load(&fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Image reference handed to `k3d image import`
    pub fn image_ref(&self) -> String {
        format!("{}:{}", self.image_name, self.image_tag)
    }

    /// Manifests path with a leading `~` expanded
    pub fn manifests_dir(&self) -> String {
        shellexpand::tilde(&self.manifests_path).into_owned()
    }
}

fn expand_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).as_ref()),
        None => path.to_path_buf(),
    }
}
