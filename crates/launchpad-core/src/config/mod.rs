//! Project configuration: types, name validation, and the question sequence

pub mod project;
pub mod questions;
pub mod validate;

pub use project::{Framework, ProjectConfig};
pub use questions::{collect, Answer, Collected, Prompter, Question, QuestionKind, QUESTIONS};
pub use validate::{validate_project_name, NameError};
