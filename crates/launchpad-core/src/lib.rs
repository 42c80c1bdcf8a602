//! Launchpad Core - project generation for React (Vite) and Next.js
//!
//! This library asks a few configuration questions, drives the upstream
//! project generators (`npm create vite`, `create-next-app`), and then
//! overlays a fixed set of template files on the generated project.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Name validation, environment probing, command execution,
//!   template resolution, best-effort file operations
//! - **Layer 2: Workflow Orchestration** - Step planning and the `Orchestrator` state machine,
//!   driven through the `CommandRunner`, `Prompter` and `Reporter` seams
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use launchpad_core::{Framework, Orchestrator, ProjectConfig, TemplateCatalog, TemplateResolver};
//!
//! let config = ProjectConfig::new(Framework::ViteReact, "demo-app", false, true)?;
//! let catalog = TemplateCatalog::bundled()?;
//! let resolver = TemplateResolver::bundled();
//! let orchestrator = Orchestrator::new(&runner, &reporter, &catalog, &resolver, base_dir);
//! let outcome = orchestrator.generate(&config).await;
//! ```

pub mod config;
pub mod pipeline;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{Framework, ProjectConfig};
pub use pipeline::{GenerationState, GenerationStep, Orchestrator, Reporter, RunOutcome};
pub use runtime::{CommandOutcome, CommandRunner, ExternalCommand};
pub use templates::{TemplateCatalog, TemplateResolver};

#[cfg(feature = "tui")]
pub use tui::run;
