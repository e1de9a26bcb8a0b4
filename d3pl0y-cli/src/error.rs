//! Error type shared by the runner, the deploy steps and the config loader
//!
//! Every variant knows the process exit code it maps to, so a failure deep in
//! a step can travel up with `?` and `main` decides how the process ends.

use snafu::Snafu;
use std::path::PathBuf;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DeployError {
    /// A required tool is not resolvable on PATH
    #[snafu(display("Required tool '{tool}' is not installed or not in your PATH"))]
    ToolMissing { tool: String },

    /// The program to spawn does not exist
    #[snafu(display("Command '{program}' not found"))]
    ProgramNotFound { program: String },

    /// Spawning failed for a reason other than a missing program
    #[snafu(display("Failed to execute '{program}': {source}"))]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// A checked command exited non-zero
    #[snafu(display("Command failed with exit code {code}: {command}"))]
    CommandFailed { command: String, code: i32 },

    /// The child ran but relaying its output or reaping it failed
    #[snafu(display("Lost track of '{program}' while relaying its output: {source}"))]
    Relay {
        program: String,
        source: std::io::Error,
    },

    #[snafu(display("Failed to read {}", path.display()))]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Failed to parse {}", path.display()))]
    ParseConfig {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub type Result<T, E = DeployError> = std::result::Result<T, E>;

impl DeployError {
    /// Process exit code for this failure
    ///
    /// A failed checked command propagates the child's own code; everything
    /// else ends the process with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            DeployError::CommandFailed { code, .. } => *code,
            _ => 1,
        }
    }

    /// Failures that are not a deliberate abort by a step
    pub fn is_unexpected(&self) -> bool {
        matches!(self, DeployError::Relay { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_propagates_child_code() {
        let err = DeployError::CommandFailed {
            command: "helm repo update".to_string(),
            code: 7,
        };
        assert_eq!(err.exit_code(), 7);
        assert!(!err.is_unexpected());
    }

    #[test]
    fn test_other_failures_exit_with_one() {
        let missing = DeployError::ToolMissing {
            tool: "k3d".to_string(),
        };
        assert_eq!(missing.exit_code(), 1);
        assert_eq!(
            missing.to_string(),
            "Required tool 'k3d' is not installed or not in your PATH"
        );

        let relay = DeployError::Relay {
            program: "kubectl".to_string(),
            source: std::io::Error::other("broken pipe"),
        };
        assert_eq!(relay.exit_code(), 1);
        assert!(relay.is_unexpected());
    }
}
