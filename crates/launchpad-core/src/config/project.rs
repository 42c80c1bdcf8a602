//! Project configuration collected from the user

use super::validate::{check_name_syntax, NameError};
use std::fmt;
use std::path::{Path, PathBuf};

/// Supported frameworks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Framework {
    ViteReact,
    NextJs,
}

impl Framework {
    pub const ALL: [Framework; 2] = [Framework::ViteReact, Framework::NextJs];

    pub fn display_name(&self) -> &'static str {
        match self {
            Framework::ViteReact => "React (Vite)",
            Framework::NextJs => "NextJS",
        }
    }

    /// Short key used by the template catalog
    pub fn key(&self) -> &'static str {
        match self {
            Framework::ViteReact => "vite",
            Framework::NextJs => "next",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Fully-populated answers for one run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    framework: Framework,
    project_name: String,
    use_typescript: bool,
    use_tailwind: bool,
}

impl ProjectConfig {
    /// Build a config, rejecting names outside `[A-Za-z0-9_-]+`.
    ///
    /// Collision with an existing path is checked by the collector, which
    /// knows the base directory.
    pub fn new(
        framework: Framework,
        project_name: impl Into<String>,
        use_typescript: bool,
        use_tailwind: bool,
    ) -> Result<Self, NameError> {
        let project_name = project_name.into();
        check_name_syntax(&project_name)?;

        Ok(Self {
            framework,
            project_name,
            use_typescript,
            use_tailwind,
        })
    }

    pub fn framework(&self) -> Framework {
        self.framework
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn use_typescript(&self) -> bool {
        self.use_typescript
    }

    pub fn use_tailwind(&self) -> bool {
        self.use_tailwind
    }

    /// Absolute project directory under `base`
    pub fn project_dir(&self, base: &Path) -> PathBuf {
        base.join(&self.project_name)
    }

    pub fn language_label(&self) -> &'static str {
        if self.use_typescript {
            "TypeScript"
        } else {
            "JavaScript"
        }
    }
}
