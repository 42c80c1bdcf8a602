//! Generation pipeline: step planning and the orchestrator that runs it

pub mod orchestrator;
pub mod step;

pub use orchestrator::{next_steps, Orchestrator, Reporter, RunOutcome, RunSummary};
pub use step::{plan, target_arg, GenerationState, GenerationStep, StepAction, TAILWIND_PACKAGES};
