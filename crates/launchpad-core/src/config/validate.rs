//! Project name validation

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Reason a project name was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Project name cannot be empty")]
    Empty,

    #[error("Project name may only contain letters, digits, '-' and '_' (found '{0}')")]
    InvalidCharacter(char),

    #[error("A file or directory named '{}' already exists", .0.display())]
    AlreadyExists(PathBuf),
}

/// Check that `name` is non-empty and matches `[A-Za-z0-9_-]+`
pub fn check_name_syntax(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }

    match name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        Some(c) => Err(NameError::InvalidCharacter(c)),
        None => Ok(()),
    }
}

/// Full project name check: syntax first, then collision with an existing
/// entry under `base`.
pub fn validate_project_name(name: &str, base: &Path) -> Result<(), NameError> {
    check_name_syntax(name)?;

    let target = base.join(name);
    // symlink_metadata so a dangling symlink still counts as taken
    if target.symlink_metadata().is_ok() {
        return Err(NameError::AlreadyExists(target));
    }

    Ok(())
}
