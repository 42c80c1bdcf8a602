//! Runs the generation flow step by step

use super::step::{plan, GenerationState, GenerationStep, StepAction};
use crate::config::{collect, Collected, ProjectConfig, Prompter};
use crate::runtime::{check_environment, CommandRunner, VersionQuery};
use crate::templates::{self, BatchReport, TemplateCatalog, TemplateResolver};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Receives progress from the orchestrator
pub trait Reporter {
    fn phase(&self, state: GenerationState);
    fn step(&self, step: &GenerationStep);
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// Terminal state of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Done,
    Failed { step: String, reason: String },
    Cancelled,
}

impl RunOutcome {
    pub fn state(&self) -> GenerationState {
        match self {
            RunOutcome::Done => GenerationState::Done,
            RunOutcome::Failed { .. } => GenerationState::Failed,
            RunOutcome::Cancelled => GenerationState::Cancelled,
        }
    }

    /// Process exit code: 0 for done or cancelled, 1 for failed
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Failed { .. } => 1,
            RunOutcome::Done | RunOutcome::Cancelled => 0,
        }
    }
}

/// Outcome plus the config it ran with (absent when cancelled or the
/// environment check failed)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub config: Option<ProjectConfig>,
}

/// Drives environment check, collection, and generation
pub struct Orchestrator<'a> {
    runner: &'a dyn CommandRunner,
    reporter: &'a dyn Reporter,
    catalog: &'a TemplateCatalog,
    resolver: &'a TemplateResolver,
    base_dir: PathBuf,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        reporter: &'a dyn Reporter,
        catalog: &'a TemplateCatalog,
        resolver: &'a TemplateResolver,
        base_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            reporter,
            catalog,
            resolver,
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Full interactive run.
    ///
    /// The environment is checked before any question is asked; a cancelled
    /// collection returns before any command runs or any file is touched.
    pub async fn run<P: Prompter + ?Sized>(
        &self,
        tools: &dyn VersionQuery,
        prompter: &mut P,
    ) -> Result<RunSummary> {
        self.reporter.phase(GenerationState::ValidatingEnv);
        match check_environment(tools) {
            Ok(report) => {
                let detected: Vec<String> = report
                    .runtimes
                    .iter()
                    .filter(|r| r.available)
                    .map(|r| format!("{} ({})", r.name, r.version.as_deref().unwrap_or("unknown")))
                    .collect();
                self.reporter
                    .success(&format!("Detected runtimes: {}", detected.join(", ")));
                for warning in &report.warnings {
                    self.reporter.warning(warning);
                }
            }
            Err(e) => {
                self.reporter.error(&e.to_string());
                self.reporter.phase(GenerationState::Failed);
                return Ok(RunSummary {
                    outcome: RunOutcome::Failed {
                        step: GenerationState::ValidatingEnv.label().to_string(),
                        reason: e.to_string(),
                    },
                    config: None,
                });
            }
        }

        self.reporter.phase(GenerationState::CollectingConfig);
        let config = match collect(prompter, &self.base_dir)? {
            Collected::Config(config) => config,
            Collected::Cancelled => {
                self.reporter.phase(GenerationState::Cancelled);
                return Ok(RunSummary {
                    outcome: RunOutcome::Cancelled,
                    config: None,
                });
            }
        };

        let outcome = self.generate(&config).await;
        Ok(RunSummary {
            outcome,
            config: Some(config),
        })
    }

    pub fn plan(&self, config: &ProjectConfig) -> Vec<GenerationStep> {
        plan(config, &self.base_dir, self.catalog, self.resolver)
    }

    /// Run the planned steps for `config` in order
    pub async fn generate(&self, config: &ProjectConfig) -> RunOutcome {
        let outcome = self.execute(self.plan(config)).await;
        self.reporter.phase(outcome.state());
        outcome
    }

    /// Run `steps` in order, stopping at the first failed fatal step
    pub async fn execute(&self, steps: Vec<GenerationStep>) -> RunOutcome {
        let mut current: Option<GenerationState> = None;

        for step in &steps {
            if current != Some(step.phase) {
                self.reporter.phase(step.phase);
                current = Some(step.phase);
            }
            self.reporter.step(step);

            match &step.action {
                StepAction::Run(command) => {
                    if let Err(e) = self.runner.run(command).into_result(command) {
                        self.reporter.error(&e.to_string());
                        if step.fatal_on_failure {
                            return RunOutcome::Failed {
                                step: step.description.clone(),
                                reason: e.to_string(),
                            };
                        }
                        self.reporter
                            .warning(&format!("Continuing after failed step: {}", step.description));
                    }
                }
                StepAction::Remove(paths) => {
                    let report = templates::remove_many(paths.clone()).await;
                    self.finish_batch(&report, "Removed", "paths");
                }
                StepAction::CleanDirectory {
                    dir,
                    keep,
                    replacements,
                } => {
                    let missing: Vec<String> = replacements
                        .iter()
                        .filter(|source| !source.is_file())
                        .map(|source| source.display().to_string())
                        .collect();

                    // Clearing the scaffold without a complete replacement would leave it unusable
                    if !missing.is_empty() {
                        self.reporter.warning(&format!(
                            "Skipping cleanup of {}: {} template file(s) unavailable ({})",
                            dir.display(),
                            missing.len(),
                            missing.join(", ")
                        ));
                        continue;
                    }

                    let report = templates::clean_directory(dir, keep).await;
                    self.finish_batch(&report, "Removed", "entries");
                }
                StepAction::Copy(pairs) => {
                    let report = templates::copy_many(pairs.clone()).await;
                    self.finish_batch(&report, "Copied", "template files");
                }
            }
        }

        RunOutcome::Done
    }

    fn finish_batch(&self, report: &BatchReport, verb: &str, noun: &str) {
        for warning in &report.warnings {
            self.reporter.warning(warning);
        }
        self.reporter
            .success(&format!("{} {} {}", verb, report.completed.len(), noun));
    }
}

/// Suggested commands once the project exists
pub fn next_steps(config: &ProjectConfig) -> Vec<String> {
    vec![
        format!("cd {}", config.project_name()),
        "npm run dev".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::questions::tests::ScriptedPrompter;
    use crate::config::{Answer, Framework};
    use crate::runtime::{CommandOutcome, ExternalCommand};
    use std::fs;
    use std::sync::Mutex;

    /// Records commands and fakes generator output for scaffold commands
    #[derive(Default)]
    struct FakeRunner {
        commands: Mutex<Vec<ExternalCommand>>,
        fail_on: Option<&'static str>,
    }

    impl FakeRunner {
        fn failing_on(fragment: &'static str) -> Self {
            Self {
                fail_on: Some(fragment),
                ..Default::default()
            }
        }

        fn recorded(&self) -> Vec<String> {
            self.commands
                .lock()
                .unwrap()
                .iter()
                .map(|c| c.to_string().replace(".cmd", ""))
                .collect()
        }

        fn scaffold(base: &Path, name: &str, typescript: bool) {
            let dir = base.join(name);
            for sub in ["public", "src/assets", "node_modules/react"] {
                fs::create_dir_all(dir.join(sub)).unwrap();
            }

            let mut files = vec![
                ("package.json", "{}"),
                ("README.md", "# generated"),
                ("index.html", "<!-- generated -->"),
                ("eslint.config.js", "// eslint"),
                ("public/vite.svg", "<svg/>"),
                ("src/assets/react.svg", "<svg/>"),
                ("src/App.css", ""),
                ("src/index.css", ""),
            ];
            if typescript {
                files.extend([
                    ("tsconfig.json", "{ \"files\": [] }"),
                    ("tsconfig.app.json", "{ \"include\": [\"src\"] }"),
                    ("tsconfig.node.json", "{ \"include\": [\"vite.config.ts\"] }"),
                    ("vite.config.ts", "// generated config"),
                    ("src/App.tsx", "// generated app"),
                    ("src/main.tsx", "// generated main"),
                ]);
            } else {
                files.extend([
                    ("vite.config.js", "// generated config"),
                    ("src/App.jsx", "// generated app"),
                    ("src/main.jsx", "// generated main"),
                ]);
            }

            for (file, body) in files {
                fs::write(dir.join(file), body).unwrap();
            }
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, command: &ExternalCommand) -> CommandOutcome {
            self.commands.lock().unwrap().push(command.clone());
            let line = command.to_string();

            if self.fail_on.is_some_and(|f| line.contains(f)) {
                return CommandOutcome::Exited { code: Some(1) };
            }

            let args = command.get_args();
            let name = match args.first().map(String::as_str) {
                Some("create") => args.get(2),
                Some("create-next-app@latest") => args.get(1),
                _ => None,
            };
            if let (Some(name), Some(cwd)) = (name, command.cwd()) {
                Self::scaffold(cwd, name, args.iter().any(|a| a == "react-ts"));
            }

            CommandOutcome::Success
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        phases: Mutex<Vec<GenerationState>>,
        steps: Mutex<Vec<String>>,
        warnings: Mutex<Vec<String>>,
        errors: Mutex<Vec<String>>,
    }

    impl Reporter for RecordingReporter {
        fn phase(&self, state: GenerationState) {
            self.phases.lock().unwrap().push(state);
        }

        fn step(&self, step: &GenerationStep) {
            self.steps.lock().unwrap().push(step.description.clone());
        }

        fn success(&self, _message: &str) {}

        fn warning(&self, message: &str) {
            self.warnings.lock().unwrap().push(message.to_string());
        }

        fn error(&self, message: &str) {
            self.errors.lock().unwrap().push(message.to_string());
        }
    }

    struct FakeTools {
        npm: bool,
    }

    impl VersionQuery for FakeTools {
        fn version(&self, program: &str) -> Option<String> {
            match program.trim_end_matches(".cmd") {
                "npm" if self.npm => Some("10.9.0".to_string()),
                "node" => Some("v22.12.0".to_string()),
                _ => None,
            }
        }
    }

    fn vite(ts: bool, tw: bool) -> ProjectConfig {
        ProjectConfig::new(Framework::ViteReact, "demo-app", ts, tw).unwrap()
    }

    #[tokio::test]
    async fn test_vite_tailwind_end_to_end() {
        let base = tempfile::tempdir().unwrap();
        let runner = FakeRunner::default();
        let reporter = RecordingReporter::default();
        let catalog = TemplateCatalog::bundled().unwrap();
        let resolver = TemplateResolver::bundled();
        let orchestrator = Orchestrator::new(&runner, &reporter, &catalog, &resolver, base.path());

        let outcome = orchestrator.generate(&vite(false, true)).await;

        assert_eq!(outcome, RunOutcome::Done);
        assert_eq!(
            runner.recorded(),
            vec![
                "npm create vite@latest demo-app -- --template react",
                "npm install",
                "npm install tailwindcss @tailwindcss/vite",
            ]
        );
        assert_eq!(reporter.steps.lock().unwrap().len(), 5);
        assert_eq!(
            *reporter.phases.lock().unwrap(),
            vec![
                GenerationState::ScaffoldingBase,
                GenerationState::InstallingExtras,
                GenerationState::MaterializingTemplates,
                GenerationState::Done,
            ]
        );

        let project = base.path().join("demo-app");
        assert!(project.join("package.json").exists());
        assert!(project.join("node_modules/react").exists());
        assert!(!project.join("README.md").exists());
        assert!(!project.join("public").exists());
        assert!(!project.join("src/App.css").exists());
        assert!(fs::read_to_string(project.join("vite.config.js"))
            .unwrap()
            .contains("tailwindcss()"));
        assert!(fs::read_to_string(project.join("src/style/index.css"))
            .unwrap()
            .contains("@import \"tailwindcss\""));
        assert!(project.join("src/main.jsx").exists());
        assert!(reporter.warnings.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_plain_overlay_writes_no_tailwind_config() {
        let base = tempfile::tempdir().unwrap();
        let runner = FakeRunner::default();
        let reporter = RecordingReporter::default();
        let catalog = TemplateCatalog::bundled().unwrap();
        let resolver = TemplateResolver::bundled();
        let orchestrator = Orchestrator::new(&runner, &reporter, &catalog, &resolver, base.path());

        let outcome = orchestrator.generate(&vite(false, false)).await;

        assert_eq!(outcome, RunOutcome::Done);
        let project = base.path().join("demo-app");
        assert_eq!(
            fs::read_to_string(project.join("vite.config.js")).unwrap(),
            "// generated config"
        );
        assert!(project.join(".gitignore").exists());
        assert!(project.join("src/style/index.css").exists());
        assert!(!project.join("src/assets").exists());
        assert!(!runner.recorded().iter().any(|c| c.contains("tailwind")));
    }

    #[tokio::test]
    async fn test_next_runs_only_scaffold() {
        let base = tempfile::tempdir().unwrap();
        let runner = FakeRunner::default();
        let reporter = RecordingReporter::default();
        let catalog = TemplateCatalog::bundled().unwrap();
        let resolver = TemplateResolver::bundled();
        let orchestrator = Orchestrator::new(&runner, &reporter, &catalog, &resolver, base.path());

        let config = ProjectConfig::new(Framework::NextJs, "site", false, false).unwrap();
        let outcome = orchestrator.generate(&config).await;

        assert_eq!(outcome, RunOutcome::Done);
        assert_eq!(runner.recorded(), vec!["npx create-next-app@latest site"]);
        assert!(!reporter
            .phases
            .lock()
            .unwrap()
            .contains(&GenerationState::MaterializingTemplates));
        assert!(base.path().join("site/README.md").exists());
    }

    #[tokio::test]
    async fn test_scaffold_failure_is_fatal() {
        let base = tempfile::tempdir().unwrap();
        let runner = FakeRunner::failing_on("vite@latest");
        let reporter = RecordingReporter::default();
        let catalog = TemplateCatalog::bundled().unwrap();
        let resolver = TemplateResolver::bundled();
        let orchestrator = Orchestrator::new(&runner, &reporter, &catalog, &resolver, base.path());

        let outcome = orchestrator.generate(&vite(false, true)).await;

        assert!(matches!(&outcome, RunOutcome::Failed { step, .. } if step.contains("Vite")));
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(runner.recorded().len(), 1);
        assert_eq!(reporter.errors.lock().unwrap().len(), 1);
        assert!(reporter.errors.lock().unwrap()[0].contains("npm create vite@latest"));
        assert_eq!(
            reporter.phases.lock().unwrap().last(),
            Some(&GenerationState::Failed)
        );
    }

    #[tokio::test]
    async fn test_tailwind_install_failure_leaves_project() {
        let base = tempfile::tempdir().unwrap();
        let runner = FakeRunner::failing_on("tailwindcss");
        let reporter = RecordingReporter::default();
        let catalog = TemplateCatalog::bundled().unwrap();
        let resolver = TemplateResolver::bundled();
        let orchestrator = Orchestrator::new(&runner, &reporter, &catalog, &resolver, base.path());

        let outcome = orchestrator.generate(&vite(false, true)).await;

        assert!(matches!(outcome, RunOutcome::Failed { .. }));
        assert_eq!(runner.recorded().len(), 3);
        let project = base.path().join("demo-app");
        assert!(project.join("README.md").exists());
        assert!(!project.join("src/style").exists());
    }

    #[tokio::test]
    async fn test_missing_templates_only_warn() {
        let base = tempfile::tempdir().unwrap();
        let empty_templates = tempfile::tempdir().unwrap();
        let runner = FakeRunner::default();
        let reporter = RecordingReporter::default();
        let catalog = TemplateCatalog::bundled().unwrap();
        let resolver = TemplateResolver::new(empty_templates.path());
        let orchestrator = Orchestrator::new(&runner, &reporter, &catalog, &resolver, base.path());

        let outcome = orchestrator.generate(&vite(false, false)).await;

        assert_eq!(outcome, RunOutcome::Done);
        let warnings = reporter.warnings.lock().unwrap();
        assert_eq!(warnings.len(), 5);
        assert!(warnings.iter().all(|w| w.starts_with("Missing template file")));
    }

    #[tokio::test]
    async fn test_missing_tailwind_templates_keep_the_scaffold() {
        let base = tempfile::tempdir().unwrap();
        let empty_templates = tempfile::tempdir().unwrap();
        let runner = FakeRunner::default();
        let reporter = RecordingReporter::default();
        let catalog = TemplateCatalog::bundled().unwrap();
        let resolver = TemplateResolver::new(empty_templates.path());
        let orchestrator = Orchestrator::new(&runner, &reporter, &catalog, &resolver, base.path());

        let outcome = orchestrator.generate(&vite(false, true)).await;

        assert_eq!(outcome, RunOutcome::Done);
        let project = base.path().join("demo-app");
        assert!(project.join("index.html").exists());
        assert!(project.join("vite.config.js").exists());
        assert!(project.join("src/main.jsx").exists());
        assert!(project.join("package.json").exists());

        let warnings = reporter.warnings.lock().unwrap();
        assert_eq!(warnings.len(), 6);
        assert!(warnings[0].starts_with("Skipping cleanup of"));
        assert!(warnings[0].contains("5 template file(s) unavailable"));
        assert!(warnings[1..]
            .iter()
            .all(|w| w.starts_with("Missing template file")));
    }

    #[tokio::test]
    async fn test_vite_tailwind_typescript_end_to_end() {
        let base = tempfile::tempdir().unwrap();
        let runner = FakeRunner::default();
        let reporter = RecordingReporter::default();
        let catalog = TemplateCatalog::bundled().unwrap();
        let resolver = TemplateResolver::bundled();
        let orchestrator = Orchestrator::new(&runner, &reporter, &catalog, &resolver, base.path());

        let outcome = orchestrator.generate(&vite(true, true)).await;

        assert_eq!(outcome, RunOutcome::Done);
        assert_eq!(
            runner.recorded(),
            vec![
                "npm create vite@latest demo-app -- --template react-ts",
                "npm install",
                "npm install tailwindcss @tailwindcss/vite",
            ]
        );

        let project = base.path().join("demo-app");
        for kept in ["tsconfig.json", "tsconfig.app.json", "tsconfig.node.json"] {
            assert!(project.join(kept).exists(), "{} was removed", kept);
        }
        assert!(project.join("package.json").exists());
        assert!(project.join("eslint.config.js").exists());
        assert!(fs::read_to_string(project.join("vite.config.ts"))
            .unwrap()
            .contains("tailwindcss()"));
        assert!(project.join("src/App.tsx").exists());
        assert!(project.join("src/main.tsx").exists());
        assert!(project.join("src/vite-env.d.ts").exists());
        assert!(project.join("src/style/index.css").exists());
        assert!(!project.join("vite.config.js").exists());
        assert!(!project.join("src/App.jsx").exists());
        assert!(!project.join("README.md").exists());
        assert!(!project.join("public").exists());
        assert!(reporter.warnings.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_run_touches_nothing() {
        let base = tempfile::tempdir().unwrap();
        let runner = FakeRunner::default();
        let reporter = RecordingReporter::default();
        let catalog = TemplateCatalog::bundled().unwrap();
        let resolver = TemplateResolver::bundled();
        let orchestrator = Orchestrator::new(&runner, &reporter, &catalog, &resolver, base.path());
        let mut prompter =
            ScriptedPrompter::new(vec![Some(Answer::Framework(Framework::ViteReact)), None]);

        let summary = orchestrator
            .run(&FakeTools { npm: true }, &mut prompter)
            .await
            .unwrap();

        assert_eq!(summary.outcome, RunOutcome::Cancelled);
        assert_eq!(summary.outcome.exit_code(), 0);
        assert!(summary.config.is_none());
        assert!(runner.recorded().is_empty());
        assert_eq!(fs::read_dir(base.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_missing_npm_fails_before_prompts() {
        let base = tempfile::tempdir().unwrap();
        let runner = FakeRunner::default();
        let reporter = RecordingReporter::default();
        let catalog = TemplateCatalog::bundled().unwrap();
        let resolver = TemplateResolver::bundled();
        let orchestrator = Orchestrator::new(&runner, &reporter, &catalog, &resolver, base.path());
        let mut prompter = ScriptedPrompter::new(vec![]);

        let summary = orchestrator
            .run(&FakeTools { npm: false }, &mut prompter)
            .await
            .unwrap();

        assert_eq!(summary.outcome.exit_code(), 1);
        assert!(prompter.asked.is_empty());
        assert!(runner.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_interactive_run_generates_project() {
        let base = tempfile::tempdir().unwrap();
        let runner = FakeRunner::default();
        let reporter = RecordingReporter::default();
        let catalog = TemplateCatalog::bundled().unwrap();
        let resolver = TemplateResolver::bundled();
        let orchestrator = Orchestrator::new(&runner, &reporter, &catalog, &resolver, base.path());
        let mut prompter = ScriptedPrompter::new(vec![
            Some(Answer::Framework(Framework::ViteReact)),
            Some(Answer::Text("demo-app".into())),
            Some(Answer::Confirm(true)),
            Some(Answer::Confirm(false)),
        ]);

        let summary = orchestrator
            .run(&FakeTools { npm: true }, &mut prompter)
            .await
            .unwrap();

        assert_eq!(summary.outcome, RunOutcome::Done);
        assert_eq!(
            runner.recorded(),
            vec![
                "npm create vite@latest demo-app -- --template react-ts",
                "npm install",
            ]
        );
        let config = summary.config.unwrap();
        assert_eq!(next_steps(&config), vec!["cd demo-app", "npm run dev"]);
        // TypeScript without Tailwind keeps the generator output untouched
        assert!(base.path().join("demo-app/README.md").exists());
    }
}
