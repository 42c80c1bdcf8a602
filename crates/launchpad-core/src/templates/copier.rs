//! Best-effort file operations on the generated project
//!
//! Every item runs as its own task and is joined before returning. A failure
//! on one path becomes a warning in the [`BatchReport`]; none of these
//! functions fail as a whole.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::task::JoinSet;
use walkdir::WalkDir;

/// A template source and its destination in the project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyPair {
    pub source: PathBuf,
    pub dest: PathBuf,
}

/// Result of a batch: paths handled and per-item warnings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub completed: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

impl BatchReport {
    fn merge(&mut self, other: BatchReport) {
        self.completed.extend(other.completed);
        self.warnings.extend(other.warnings);
    }
}

type ItemResult = (PathBuf, Result<(), String>);

async fn settle(mut tasks: JoinSet<ItemResult>) -> BatchReport {
    let mut report = BatchReport::default();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((path, Ok(()))) => report.completed.push(path),
            Ok((_, Err(warning))) => report.warnings.push(warning),
            Err(e) => report.warnings.push(format!("File task failed: {}", e)),
        }
    }

    report.completed.sort();
    report.warnings.sort();
    report
}

/// Remove a file or directory tree; a missing path is fine
async fn remove_path(path: &Path) -> io::Result<()> {
    let result = match fs::symlink_metadata(path).await {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path).await,
        Ok(_) => fs::remove_file(path).await,
        Err(e) => Err(e),
    };

    match result {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Recursively remove each path
pub async fn remove_many(paths: Vec<PathBuf>) -> BatchReport {
    let mut tasks = JoinSet::new();

    for path in paths {
        tasks.spawn(async move {
            let result = remove_path(&path)
                .await
                .map_err(|e| format!("Could not remove {}: {}", path.display(), e));
            (path, result)
        });
    }

    settle(tasks).await
}

async fn copy_one(pair: &CopyPair) -> Result<(), String> {
    if let Err(e) = fs::metadata(&pair.source).await {
        let name = pair
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| pair.source.display().to_string());
        return Err(if e.kind() == io::ErrorKind::NotFound {
            format!("Missing template file: {}", name)
        } else {
            format!("Could not read template file {}: {}", name, e)
        });
    }

    if let Some(parent) = pair.dest.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }

    fs::copy(&pair.source, &pair.dest)
        .await
        .map(|_| ())
        .map_err(|e| format!("Could not write {}: {}", pair.dest.display(), e))
}

/// Copy each source to its destination, creating parent directories
pub async fn copy_many(pairs: Vec<CopyPair>) -> BatchReport {
    let mut tasks = JoinSet::new();

    for pair in pairs {
        tasks.spawn(async move {
            let result = copy_one(&pair).await;
            (pair.dest, result)
        });
    }

    settle(tasks).await
}

/// Remove every immediate child of `dir` whose name is not in `keep`
pub async fn clean_directory(dir: &Path, keep: &[String]) -> BatchReport {
    let keep: HashSet<&str> = keep.iter().map(String::as_str).collect();
    let mut report = BatchReport::default();
    let mut doomed = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        match entry {
            Ok(entry) => {
                let name = entry.file_name().to_string_lossy();
                if !keep.contains(name.as_ref()) {
                    doomed.push(entry.into_path());
                }
            }
            Err(e) => report
                .warnings
                .push(format!("Could not read {}: {}", dir.display(), e)),
        }
    }

    report.merge(remove_many(doomed).await);
    report
}
