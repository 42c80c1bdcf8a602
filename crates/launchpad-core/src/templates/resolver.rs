//! Maps logical template ids to files on disk

use std::path::{Path, PathBuf};

/// Directory the templates were bundled in at build time
const BUILD_TEMPLATE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates");

/// Resolves template ids like `tailwind/app` to `<root>/tailwind/app.txt`.
///
/// The root never depends on the current working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateResolver {
    root: PathBuf,
}

impl TemplateResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Templates shipped next to the executable, falling back to the build-time location
    pub fn bundled() -> Self {
        let beside_exe = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("templates")))
            .filter(|dir| dir.join("template.yaml").is_file());

        Self::new(beside_exe.unwrap_or_else(|| PathBuf::from(BUILD_TEMPLATE_DIR)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, template_id: &str) -> PathBuf {
        let mut path = self.root.clone();
        let mut segments = template_id.split('/').filter(|s| !s.is_empty()).peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_some() {
                path.push(segment);
            } else {
                path.push(format!("{}.txt", segment));
            }
        }
        path
    }
}
