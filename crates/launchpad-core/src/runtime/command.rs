//! External command execution with the terminal handed through
//!
//! Generators may prompt the user or print progress, so nothing is captured:
//! stdin, stdout and stderr are inherited and only the exit outcome is observed.

use colored::Colorize;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;

/// An argv-style command with an optional working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// `npm`, or its `.cmd` shim on Windows
    pub fn npm() -> Self {
        Self::new(platform_program("npm"))
    }

    /// `npx`, or its `.cmd` shim on Windows
    pub fn npx() -> Self {
        Self::new(platform_program("npx"))
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

fn platform_program(name: &str) -> String {
    if cfg!(windows) {
        format!("{}.cmd", name)
    } else {
        name.to_string()
    }
}

/// How an external command ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Success,
    /// Non-zero exit; `code` is `None` when the process was killed by a signal
    Exited { code: Option<i32> },
    /// Program not found on PATH
    NotFound,
    /// The working directory does not exist, so nothing was started
    MissingDirectory(PathBuf),
    SpawnFailed(String),
}

impl CommandOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, CommandOutcome::Success)
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            CommandOutcome::Success => Some(0),
            CommandOutcome::Exited { code } => *code,
            CommandOutcome::NotFound
            | CommandOutcome::MissingDirectory(_)
            | CommandOutcome::SpawnFailed(_) => None,
        }
    }

    /// Turn a failed outcome into a reportable error naming the command
    pub fn into_result(self, command: &ExternalCommand) -> Result<(), CommandError> {
        let command = command.to_string();
        match self {
            CommandOutcome::Success => Ok(()),
            CommandOutcome::Exited { code } => Err(CommandError::Exited { command, code }),
            CommandOutcome::NotFound => Err(CommandError::NotFound { command }),
            CommandOutcome::MissingDirectory(dir) => {
                Err(CommandError::MissingDirectory { command, dir })
            }
            CommandOutcome::SpawnFailed(message) => Err(CommandError::Spawn { command, message }),
        }
    }

    fn from_status(status: io::Result<std::process::ExitStatus>) -> Self {
        match status {
            Ok(status) if status.success() => CommandOutcome::Success,
            Ok(status) => CommandOutcome::Exited {
                code: status.code(),
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => CommandOutcome::NotFound,
            Err(e) => CommandOutcome::SpawnFailed(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Command not found: {command}")]
    NotFound { command: String },

    #[error("Error executing command: {command} ({})", describe_exit(.code))]
    Exited { command: String, code: Option<i32> },

    #[error("Cannot run {command}: working directory {} does not exist", .dir.display())]
    MissingDirectory { command: String, dir: PathBuf },

    #[error("Failed to start {command}: {message}")]
    Spawn { command: String, message: String },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Runs external commands to completion
pub trait CommandRunner {
    fn run(&self, command: &ExternalCommand) -> CommandOutcome;
}

/// Runs commands attached to the current terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalRunner;

impl CommandRunner for TerminalRunner {
    fn run(&self, command: &ExternalCommand) -> CommandOutcome {
        println!();
        println!("{} {}", "Running:".dimmed(), command.to_string().yellow());
        println!();

        let mut process = Command::new(command.program());
        process
            .args(command.get_args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        if let Some(dir) = command.cwd() {
            // spawn reports a missing cwd as NotFound, same as a missing program
            if !dir.is_dir() {
                return CommandOutcome::MissingDirectory(dir.to_path_buf());
            }
            process.current_dir(dir);
        }

        CommandOutcome::from_status(process.status())
    }
}
