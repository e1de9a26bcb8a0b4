use crate::config::DeployConfig;
use crate::error::Result;
use crate::runner::{CommandLine, Executor, Runner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceState {
    AlreadyExists,
    Created,
}

fn kubectl() -> CommandLine {
    CommandLine::new("kubectl")
}

/// Create the namespace if missing, then apply the manifests directory into it
pub fn deploy_application<E: Executor>(
    runner: &mut Runner<E>,
    config: &DeployConfig,
) -> Result<NamespaceState> {
    println!("\n--- 4. Deploying Application to Kubernetes ---");
    let namespace = config.namespace.as_str();

    println!("Creating namespace '{namespace}' if it doesn't exist...");
    let state = if runner.query(&kubectl().args(["get", "namespace", namespace]))? == 0 {
        println!("✅ Namespace '{namespace}' already exists.");
        NamespaceState::AlreadyExists
    } else {
        runner.run_checked(&kubectl().args(["create", "namespace", namespace]))?;
        println!("✅ Namespace '{namespace}' created.");
        NamespaceState::Created
    };

    let manifests = config.manifests_dir();
    println!("Applying Kubernetes manifests from '{manifests}'...");
    runner.run_checked(&kubectl().args(["apply", "-f", manifests.as_str(), "-n", namespace]))?;
    println!("✅ Application deployed successfully.");
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::testing::RecordingExecutor;

    #[test]
    fn test_existing_namespace_is_not_recreated() {
        let mut runner = Runner::new(RecordingExecutor::with_tools(&["kubectl"]));
        let state = deploy_application(&mut runner, &DeployConfig::default()).unwrap();

        assert_eq!(state, NamespaceState::AlreadyExists);
        assert_eq!(
            runner.executor().commands(),
            vec![
                "kubectl get namespace monitoring-app",
                "kubectl apply -f k8s/ -n monitoring-app",
            ]
        );
    }

    #[test]
    fn test_missing_namespace_is_created_then_applied() {
        let executor =
            RecordingExecutor::with_tools(&["kubectl"]).respond("kubectl get namespace", 1);
        let mut runner = Runner::new(executor);
        let state = deploy_application(&mut runner, &DeployConfig::default()).unwrap();

        assert_eq!(state, NamespaceState::Created);
        assert_eq!(
            runner.executor().commands(),
            vec![
                "kubectl get namespace monitoring-app",
                "kubectl create namespace monitoring-app",
                "kubectl apply -f k8s/ -n monitoring-app",
            ]
        );
    }

    #[test]
    fn test_apply_failure_aborts() {
        let executor = RecordingExecutor::with_tools(&["kubectl"]).respond("kubectl apply", 1);
        let mut runner = Runner::new(executor);
        assert!(deploy_application(&mut runner, &DeployConfig::default()).is_err());
    }
}
