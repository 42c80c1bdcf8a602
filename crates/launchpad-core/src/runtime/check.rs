//! Environment detection for npm and Node.js

use super::version;
use std::process::{Command, Output, Stdio};
use thiserror::Error;

/// Oldest Node.js release the current Vite generator supports
pub const MIN_NODE_VERSION: &str = "20.19.0";

/// Runtime detection result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

impl RuntimeInfo {
    fn missing(name: &'static str) -> Self {
        Self {
            name,
            version: None,
            available: false,
        }
    }
}

/// Asks a tool for its version by running `<program> --version`
pub trait VersionQuery {
    /// Trimmed stdout on zero exit, `None` otherwise
    fn version(&self, program: &str) -> Option<String>;
}

/// Runs tools found on the real PATH
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTools;

impl VersionQuery for SystemTools {
    fn version(&self, program: &str) -> Option<String> {
        Command::new(program)
            .arg("--version")
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .ok()
            .and_then(version_from_output)
    }
}

/// Zero exit status is success; stdout is only kept for display
fn version_from_output(output: Output) -> Option<String> {
    if output.status.success() {
        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvironmentError {
    #[error("{name} is required but was not found ({hint})")]
    MissingTool { name: &'static str, hint: &'static str },
}

/// Detected runtimes plus advisory warnings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentReport {
    pub runtimes: Vec<RuntimeInfo>,
    pub warnings: Vec<String>,
}

fn detect(tools: &dyn VersionQuery, name: &'static str, program: &str) -> RuntimeInfo {
    match tools.version(program) {
        Some(version) => RuntimeInfo {
            name,
            version: Some(version),
            available: true,
        },
        None => RuntimeInfo::missing(name),
    }
}

/// Check that npm is invocable. Node.js is only checked advisorily.
pub fn check_environment(tools: &dyn VersionQuery) -> Result<EnvironmentReport, EnvironmentError> {
    let npm = detect(tools, "npm", if cfg!(windows) { "npm.cmd" } else { "npm" });
    if !npm.available {
        return Err(EnvironmentError::MissingTool {
            name: "npm",
            hint: "install Node.js from https://nodejs.org",
        });
    }

    let mut report = EnvironmentReport {
        runtimes: vec![npm],
        warnings: Vec::new(),
    };

    let node = detect(tools, "Node.js", "node");
    match node.version.as_deref() {
        Some(found) => {
            if let Some(warning) = version::check_minimum("Node.js", found, MIN_NODE_VERSION) {
                report.warnings.push(warning);
            }
        }
        None => report
            .warnings
            .push("Node.js was not found on PATH; generators may fail to start".to_string()),
    }
    report.runtimes.push(node);

    Ok(report)
}
