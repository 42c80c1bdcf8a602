//! Template catalog types and parsing
//!
//! The catalog (`templates/template.yaml`) is embedded at compile time and
//! declares one template set per framework/styling/language combination.

use crate::config::{Framework, ProjectConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Component, Path};
use thiserror::Error;

const BUNDLED_CATALOG: &str = include_str!("../../templates/template.yaml");

/// How generator output is cleared before the overlay is copied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Cleanup {
    /// Remove just these paths (relative to the project directory)
    Remove { paths: Vec<String> },

    /// Remove every top-level entry except these names
    KeepOnly { entries: Vec<String> },
}

/// One template file and where it lands in the project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateFile {
    /// Logical template id, resolved by [`super::TemplateResolver`]
    pub template: String,

    /// Destination path relative to the project directory
    pub dest: String,
}

/// Overlay for one framework/styling/language combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSet {
    pub name: String,

    /// Framework key (`vite`, `next`)
    pub framework: String,

    #[serde(default)]
    pub typescript: bool,

    #[serde(default)]
    pub tailwind: bool,

    pub cleanup: Cleanup,

    pub files: Vec<TemplateFile>,
}

impl TemplateSet {
    pub fn matches(&self, config: &ProjectConfig) -> bool {
        Framework::from_key(&self.framework) == Some(config.framework())
            && self.typescript == config.use_typescript()
            && self.tailwind == config.use_tailwind()
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse template catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Template set '{set}' names unknown framework '{framework}'")]
    UnknownFramework { set: String, framework: String },

    #[error("Template sets '{first}' and '{second}' cover the same combination")]
    DuplicateCombination { first: String, second: String },

    #[error("Template '{template}' is used by more than one set")]
    SharedTemplate { template: String },

    #[error("Template set '{set}' writes '{dest}' more than once")]
    DuplicateDestination { set: String, dest: String },

    #[error("Template set '{set}' has a path outside the project: '{path}'")]
    UnsafePath { set: String, path: String },
}

/// All template sets known to the tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateCatalog {
    pub sets: Vec<TemplateSet>,
}

impl TemplateCatalog {
    /// The catalog compiled into the binary
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::parse(BUNDLED_CATALOG)
    }

    pub fn parse(content: &str) -> Result<Self, CatalogError> {
        let catalog: TemplateCatalog = serde_yaml::from_str(content)?;
        catalog.check()?;
        Ok(catalog)
    }

    /// The set for this configuration, if the combination has an overlay
    pub fn find(&self, config: &ProjectConfig) -> Option<&TemplateSet> {
        self.sets.iter().find(|set| set.matches(config))
    }

    fn check(&self) -> Result<(), CatalogError> {
        let mut combinations: Vec<(Framework, bool, bool, &str)> = Vec::new();
        let mut templates = HashSet::new();

        for set in &self.sets {
            let framework = Framework::from_key(&set.framework).ok_or_else(|| {
                CatalogError::UnknownFramework {
                    set: set.name.clone(),
                    framework: set.framework.clone(),
                }
            })?;

            if let Some((.., first)) = combinations
                .iter()
                .find(|(f, ts, tw, _)| *f == framework && *ts == set.typescript && *tw == set.tailwind)
            {
                return Err(CatalogError::DuplicateCombination {
                    first: first.to_string(),
                    second: set.name.clone(),
                });
            }
            combinations.push((framework, set.typescript, set.tailwind, &set.name));

            let cleanup_paths = match &set.cleanup {
                Cleanup::Remove { paths } => paths,
                Cleanup::KeepOnly { entries } => entries,
            };

            let mut dests = HashSet::new();
            for file in &set.files {
                if !templates.insert(file.template.as_str()) {
                    return Err(CatalogError::SharedTemplate {
                        template: file.template.clone(),
                    });
                }
                if !dests.insert(file.dest.as_str()) {
                    return Err(CatalogError::DuplicateDestination {
                        set: set.name.clone(),
                        dest: file.dest.clone(),
                    });
                }
            }

            for path in set.files.iter().map(|f| &f.dest).chain(cleanup_paths) {
                if !is_contained(path) {
                    return Err(CatalogError::UnsafePath {
                        set: set.name.clone(),
                        path: path.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Relative path that cannot climb out of the project directory
fn is_contained(path: &str) -> bool {
    !path.is_empty()
        && Path::new(path)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}
