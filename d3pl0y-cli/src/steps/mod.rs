//! Deploy steps, each idempotent on its own
//!
//! - cluster: create or reuse the k3d cluster, delete it on cleanup
//! - image: import the app image into the cluster
//! - monitoring: kube-prometheus-stack via helm
//! - app: namespace plus manifests via kubectl

pub mod app;
pub mod cluster;
pub mod image;
pub mod monitoring;

pub use app::{NamespaceState, deploy_application};
pub use cluster::{ClusterState, delete_cluster, ensure_cluster};
pub use image::import_image;
pub use monitoring::deploy_monitoring_stack;
