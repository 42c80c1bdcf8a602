//! Configuration questions and the collector that walks them
//!
//! Each question declares an activation predicate over the answers collected
//! so far. Inactive questions are skipped and their field falls back to its
//! default. The terminal side lives behind [`Prompter`] so the walk can run
//! against scripted answers in tests.

use super::project::{Framework, ProjectConfig};
use super::validate::validate_project_name;
use anyhow::Result;
use std::path::Path;

/// Field a question fills in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Framework,
    ProjectName,
    TypeScript,
    Tailwind,
}

/// When a question is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Always,
    WhenFramework(Framework),
}

impl Activation {
    pub fn is_active(&self, answers: &Answers) -> bool {
        match self {
            Activation::Always => true,
            Activation::WhenFramework(expected) => answers.framework == Some(*expected),
        }
    }
}

/// How a question is asked, with its default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    SelectFramework,
    Input { default: &'static str },
    Confirm { default: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub field: Field,
    pub prompt: &'static str,
    pub kind: QuestionKind,
    pub activation: Activation,
}

/// The fixed question sequence
pub const QUESTIONS: [Question; 4] = [
    Question {
        field: Field::Framework,
        prompt: "Choose your framework",
        kind: QuestionKind::SelectFramework,
        activation: Activation::Always,
    },
    Question {
        field: Field::ProjectName,
        prompt: "Enter the name of your project",
        kind: QuestionKind::Input {
            default: "my-project",
        },
        activation: Activation::Always,
    },
    Question {
        field: Field::TypeScript,
        prompt: "Do you want to use TypeScript?",
        kind: QuestionKind::Confirm { default: false },
        activation: Activation::WhenFramework(Framework::ViteReact),
    },
    Question {
        field: Field::Tailwind,
        prompt: "Do you want to use Tailwind CSS?",
        kind: QuestionKind::Confirm { default: true },
        activation: Activation::WhenFramework(Framework::ViteReact),
    },
];

/// A single answer from the prompter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Framework(Framework),
    Text(String),
    Confirm(bool),
}

/// Answers gathered so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    pub framework: Option<Framework>,
    pub project_name: Option<String>,
    pub use_typescript: Option<bool>,
    pub use_tailwind: Option<bool>,
}

/// Source of answers (terminal prompts, or a script in tests)
pub trait Prompter {
    /// Ask one question. `Ok(None)` means the user aborted.
    fn ask(&mut self, question: &Question) -> Result<Option<Answer>>;

    /// Tell the user why the previous answer was rejected before it is asked again
    fn rejected(&mut self, question: &Question, reason: &str) -> Result<()>;
}

/// Outcome of the collection phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collected {
    Config(ProjectConfig),
    Cancelled,
}

/// Walk [`QUESTIONS`], re-asking on invalid answers.
///
/// Project names are validated against `base`. An abort on any prompt ends
/// the walk and yields [`Collected::Cancelled`].
pub fn collect<P: Prompter + ?Sized>(prompter: &mut P, base: &Path) -> Result<Collected> {
    let mut answers = Answers::default();

    for question in QUESTIONS.iter() {
        if !question.activation.is_active(&answers) {
            continue;
        }

        loop {
            let Some(answer) = prompter.ask(question)? else {
                return Ok(Collected::Cancelled);
            };

            match apply(&mut answers, question, answer, base) {
                Ok(()) => break,
                Err(reason) => prompter.rejected(question, &reason)?,
            }
        }
    }

    Ok(finish(answers))
}

fn apply(answers: &mut Answers, question: &Question, answer: Answer, base: &Path) -> Result<(), String> {
    match (question.field, answer) {
        (Field::Framework, Answer::Framework(framework)) => answers.framework = Some(framework),
        (Field::ProjectName, Answer::Text(name)) => {
            validate_project_name(&name, base).map_err(|e| e.to_string())?;
            answers.project_name = Some(name);
        }
        (Field::TypeScript, Answer::Confirm(value)) => answers.use_typescript = Some(value),
        (Field::Tailwind, Answer::Confirm(value)) => answers.use_tailwind = Some(value),
        (field, other) => return Err(format!("Unexpected answer {:?} for {:?}", other, field)),
    }
    Ok(())
}

fn finish(answers: Answers) -> Collected {
    let (Some(framework), Some(name)) = (answers.framework, answers.project_name) else {
        return Collected::Cancelled;
    };

    match ProjectConfig::new(
        framework,
        name,
        answers.use_typescript.unwrap_or(false),
        answers.use_tailwind.unwrap_or(false),
    ) {
        Ok(config) => Collected::Config(config),
        Err(_) => Collected::Cancelled,
    }
}
