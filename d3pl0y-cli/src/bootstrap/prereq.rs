//! Prerequisite checker
//!
//! Validates that every tool the deploy shells out to resolves on PATH before
//! anything is spawned.

use crate::error::{Result, ToolMissingSnafu};
use crate::runner::{Executor, Runner};
use std::path::PathBuf;

/// Result of prerequisite check for a single binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryCheck {
    pub name: String,
    pub path: PathBuf,
}

/// Overall prerequisite check result
#[derive(Debug, Default)]
pub struct PrereqResult {
    pub required: Vec<BinaryCheck>,
}

impl PrereqResult {
    pub fn names(&self) -> Vec<&str> {
        self.required.iter().map(|b| b.name.as_str()).collect()
    }
}

/// Check each required tool in order, stopping at the first one missing
pub fn check_prerequisites<E: Executor>(
    runner: &Runner<E>,
    required_tools: &[String],
) -> Result<PrereqResult> {
    println!("--- 0. Checking Prerequisites ---");
    let mut result = PrereqResult::default();

    for tool in required_tools {
        let Some(path) = runner.locate(tool) else {
            println!("❌ Error: Required tool '{tool}' is not installed or not in your PATH.");
            return ToolMissingSnafu { tool }.fail();
        };
        tracing::debug!("found {} at {}", tool, path.display());
        result.required.push(BinaryCheck {
            name: tool.clone(),
            path,
        });
    }

    for bin in &result.required {
        println!("  ✓ {} ({})", bin.name, bin.path.display());
    }
    println!("✅ All prerequisites are satisfied.");
    Ok(result)
}
