//! Generation states and step planning

use crate::config::{Framework, ProjectConfig};
use crate::runtime::ExternalCommand;
use crate::templates::{Cleanup, CopyPair, TemplateCatalog, TemplateResolver};
use std::fmt;
use std::path::{Path, PathBuf};

/// Packages added when Tailwind CSS is selected
pub const TAILWIND_PACKAGES: [&str; 2] = ["tailwindcss", "@tailwindcss/vite"];

/// Where a run is in the generation flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationState {
    CollectingConfig,
    ValidatingEnv,
    ScaffoldingBase,
    InstallingExtras,
    MaterializingTemplates,
    Done,
    Failed,
    Cancelled,
}

impl GenerationState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GenerationState::Done | GenerationState::Failed | GenerationState::Cancelled
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            GenerationState::CollectingConfig => "Project configuration",
            GenerationState::ValidatingEnv => "Checking environment",
            GenerationState::ScaffoldingBase => "Scaffolding",
            GenerationState::InstallingExtras => "Installing packages",
            GenerationState::MaterializingTemplates => "Applying templates",
            GenerationState::Done => "Done",
            GenerationState::Failed => "Failed",
            GenerationState::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for GenerationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What a step does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    Run(ExternalCommand),
    Remove(Vec<PathBuf>),
    /// Clear `dir` except `keep`; skipped unless every path in `replacements` exists
    CleanDirectory {
        dir: PathBuf,
        keep: Vec<String>,
        replacements: Vec<PathBuf>,
    },
    Copy(Vec<CopyPair>),
}

/// One unit of work in the generation flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationStep {
    pub description: String,
    pub phase: GenerationState,
    pub action: StepAction,
    pub fatal_on_failure: bool,
}

impl GenerationStep {
    fn fatal(phase: GenerationState, description: impl Into<String>, command: ExternalCommand) -> Self {
        Self {
            description: description.into(),
            phase,
            action: StepAction::Run(command),
            fatal_on_failure: true,
        }
    }

    fn best_effort(description: impl Into<String>, action: StepAction) -> Self {
        Self {
            description: description.into(),
            phase: GenerationState::MaterializingTemplates,
            action,
            fatal_on_failure: false,
        }
    }
}

/// Project argument for a generator command.
///
/// Names may start with `-`, which npm and the generators would parse as a
/// flag, so those are passed as a relative path instead.
pub fn target_arg(name: &str) -> String {
    if name.starts_with('-') {
        format!("./{}", name)
    } else {
        name.to_string()
    }
}

/// Ordered steps for `config`, with the project created under `base`.
///
/// Order: scaffold, base install, Tailwind install, cleanup, overlay.
pub fn plan(
    config: &ProjectConfig,
    base: &Path,
    catalog: &TemplateCatalog,
    resolver: &TemplateResolver,
) -> Vec<GenerationStep> {
    let name = config.project_name();
    let target = target_arg(name);
    let project_dir = config.project_dir(base);

    match config.framework() {
        Framework::NextJs => vec![GenerationStep::fatal(
            GenerationState::ScaffoldingBase,
            format!("Creating a Next.js project: {}", name),
            ExternalCommand::npx()
                .args(["create-next-app@latest", target.as_str()])
                .current_dir(base),
        )],
        Framework::ViteReact => {
            let template = if config.use_typescript() {
                "react-ts"
            } else {
                "react"
            };

            let mut steps = vec![
                GenerationStep::fatal(
                    GenerationState::ScaffoldingBase,
                    format!(
                        "Creating a Vite project: {} ({})",
                        name,
                        config.language_label()
                    ),
                    ExternalCommand::npm()
                        .args(["create", "vite@latest", target.as_str(), "--", "--template", template])
                        .current_dir(base),
                ),
                GenerationStep::fatal(
                    GenerationState::InstallingExtras,
                    "Installing dependencies",
                    ExternalCommand::npm().arg("install").current_dir(&project_dir),
                ),
            ];

            if config.use_tailwind() {
                steps.push(GenerationStep::fatal(
                    GenerationState::InstallingExtras,
                    "Installing Tailwind CSS",
                    ExternalCommand::npm()
                        .arg("install")
                        .args(TAILWIND_PACKAGES)
                        .current_dir(&project_dir),
                ));
            }

            if let Some(set) = catalog.find(config) {
                let pairs: Vec<CopyPair> = set
                    .files
                    .iter()
                    .map(|file| CopyPair {
                        source: resolver.resolve(&file.template),
                        dest: project_dir.join(&file.dest),
                    })
                    .collect();

                steps.push(match &set.cleanup {
                    Cleanup::Remove { paths } => GenerationStep::best_effort(
                        "Removing unneeded generator files",
                        StepAction::Remove(paths.iter().map(|p| project_dir.join(p)).collect()),
                    ),
                    Cleanup::KeepOnly { entries } => GenerationStep::best_effort(
                        format!("Cleaning project directory (keeping {})", entries.join(", ")),
                        StepAction::CleanDirectory {
                            dir: project_dir.clone(),
                            keep: entries.clone(),
                            replacements: pairs.iter().map(|p| p.source.clone()).collect(),
                        },
                    ),
                });

                steps.push(GenerationStep::best_effort(
                    format!("Copying {} template files ({})", pairs.len(), set.name),
                    StepAction::Copy(pairs),
                ));
            }

            steps
        }
    }
}
