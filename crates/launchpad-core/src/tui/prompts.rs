//! Charm-style CLI prompts using cliclack

use crate::config::{validate_project_name, Answer, Framework, ProjectConfig, Prompter, Question, QuestionKind};
use crate::pipeline::{next_steps, GenerationState, GenerationStep, Orchestrator, Reporter, RunOutcome};
use crate::runtime::{SystemTools, TerminalRunner};
use crate::templates::{TemplateCatalog, TemplateResolver};
use anyhow::Result;
use std::io;
use std::path::PathBuf;

/// CLI arguments for a launch
#[derive(Debug, Clone, Default)]
pub struct LaunchArgs {
    /// Local directory to read template files from instead of the bundled ones
    pub template_dir: Option<PathBuf>,
}

/// Asks the configuration questions in the terminal
pub struct ClackPrompter {
    base_dir: PathBuf,
}

impl ClackPrompter {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }
}

impl Prompter for ClackPrompter {
    fn ask(&mut self, question: &Question) -> Result<Option<Answer>> {
        let answer = match question.kind {
            QuestionKind::SelectFramework => {
                let mut select = cliclack::select(question.prompt);
                for framework in Framework::ALL {
                    select = select.item(framework, framework.display_name(), "");
                }
                select.interact().map(Answer::Framework)
            }
            QuestionKind::Input { default } => {
                let base = self.base_dir.clone();
                cliclack::input(question.prompt)
                    .placeholder(default)
                    .default_input(default)
                    .validate(move |input: &String| {
                        validate_project_name(input, &base).map_err(|e| e.to_string())
                    })
                    .interact()
                    .map(Answer::Text)
            }
            QuestionKind::Confirm { default } => cliclack::confirm(question.prompt)
                .initial_value(default)
                .interact()
                .map(Answer::Confirm),
        };

        match answer {
            Ok(answer) => Ok(Some(answer)),
            // Esc or Ctrl-C inside a prompt
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn rejected(&mut self, _question: &Question, reason: &str) -> Result<()> {
        cliclack::log::warning(reason)?;
        Ok(())
    }
}

/// Reports progress through cliclack log lines.
///
/// No spinners: generator subprocesses write to the same terminal.
pub struct ClackReporter;

impl Reporter for ClackReporter {
    fn phase(&self, state: GenerationState) {
        if !state.is_terminal() {
            let _ = cliclack::log::step(state.label());
        }
    }

    fn step(&self, step: &GenerationStep) {
        let _ = cliclack::log::info(&step.description);
    }

    fn success(&self, message: &str) {
        let _ = cliclack::log::success(message);
    }

    fn warning(&self, message: &str) {
        let _ = cliclack::log::warning(message);
    }

    fn error(&self, message: &str) {
        let _ = cliclack::log::error(message);
    }
}

/// Run the CLI with interactive prompts. Returns the process exit code.
pub async fn run(args: LaunchArgs) -> Result<i32> {
    cliclack::intro("Project Configuration")?;

    let base_dir = std::env::current_dir()?;
    let catalog = TemplateCatalog::bundled()?;

    let resolver = match args.template_dir {
        Some(dir) => {
            let dir = if dir.is_absolute() { dir } else { base_dir.join(dir) };
            cliclack::log::info(format!("Using local templates from {}", dir.display()))?;
            TemplateResolver::new(dir)
        }
        None => TemplateResolver::bundled(),
    };

    let runner = TerminalRunner;
    let reporter = ClackReporter;
    let mut prompter = ClackPrompter::new(base_dir.clone());
    let orchestrator = Orchestrator::new(&runner, &reporter, &catalog, &resolver, base_dir);

    let summary = orchestrator.run(&SystemTools, &mut prompter).await?;

    match &summary.outcome {
        RunOutcome::Done => {
            if let Some(config) = &summary.config {
                print_next_steps(config);
            }
            cliclack::outro("Project setup complete! Happy coding!")?;
        }
        RunOutcome::Failed { step, .. } => {
            cliclack::outro_cancel(format!("{} failed", step))?;
        }
        RunOutcome::Cancelled => {
            cliclack::outro_cancel("Setup cancelled.")?;
        }
    }

    Ok(summary.outcome.exit_code())
}

fn print_next_steps(config: &ProjectConfig) {
    println!();
    println!("  Next steps");
    println!();

    for (i, step) in next_steps(config).iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }
    println!();
}
