//! d3pl0y: local k3d deployment with the Prometheus monitoring stack
//!
//! The deploy path checks prerequisites, creates or reuses the cluster,
//! imports the app image, installs kube-prometheus-stack and applies the app
//! manifests. `cleanup` deletes the cluster.

pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod runner;
pub mod steps;

pub use commands::{Action, execute};
pub use config::DeployConfig;
pub use error::{DeployError, Result};
pub use runner::{CommandLine, Executor, RunOptions, Runner, SystemExecutor};
