//! Runtime detection and external command execution
//!
//! This module provides:
//! - npm / Node.js detection for the environment check
//! - A command runner that hands the terminal to generator subprocesses

pub mod check;
pub mod command;
pub mod version;

pub use check::{check_environment, EnvironmentError, EnvironmentReport, RuntimeInfo, SystemTools, VersionQuery};
pub use command::{CommandError, CommandOutcome, CommandRunner, ExternalCommand, TerminalRunner};
