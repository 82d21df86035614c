use crate::error::{Md2ProjectError, Result};
use crate::extractor::ExtractionResult;
use crate::ui::GracefulShutdown;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, Instant};

/// A single entry that could not be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteFailure {
    pub path: String,
    pub message: String,
}

/// Progress notifications emitted while materializing.
#[derive(Debug, Clone, Copy)]
pub enum MaterializeEvent<'a> {
    /// Directory path relative to the output root.
    DirectoryCreated(&'a Path),
    FileWritten(&'a str),
    WriteFailed(&'a WriteFailure),
}

#[derive(Debug, Clone)]
pub struct MaterializeOutcome {
    pub created_directories: Vec<PathBuf>,
    pub written_files: Vec<String>,
    pub errors: Vec<WriteFailure>,
    /// Set when an interrupt stopped the run before every entry was handled.
    pub cancelled: bool,
    pub start_time: Instant,
}

impl MaterializeOutcome {
    fn new() -> Self {
        Self {
            created_directories: Vec::new(),
            written_files: Vec::new(),
            errors: Vec::new(),
            cancelled: false,
            start_time: Instant::now(),
        }
    }

    pub fn directories_created(&self) -> usize {
        self.created_directories.len()
    }

    pub fn files_written(&self) -> usize {
        self.written_files.len()
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Writes extracted files below an output root.
pub struct Materializer<'a> {
    shutdown: Option<&'a GracefulShutdown>,
}

impl<'a> Materializer<'a> {
    pub fn new() -> Self {
        Self { shutdown: None }
    }

    /// Stops between entries once `shutdown` reports an interrupt.
    pub fn with_shutdown(mut self, shutdown: &'a GracefulShutdown) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    pub fn materialize(&self, files: &ExtractionResult, root: &Path) -> Result<MaterializeOutcome> {
        self.materialize_with_progress(files, root, None)
    }

    /// Creates `root` if needed, then writes every entry in path order.
    ///
    /// Only a failure to create `root` is returned as an error. Problems with
    /// individual entries are recorded in the outcome and processing moves on.
    pub fn materialize_with_progress(
        &self,
        files: &ExtractionResult,
        root: &Path,
        progress_callback: Option<&dyn Fn(MaterializeEvent<'_>)>,
    ) -> Result<MaterializeOutcome> {
        fs::create_dir_all(root).map_err(|source| Md2ProjectError::OutputRoot {
            path: root.display().to_string(),
            source,
        })?;

        let notify = |event: MaterializeEvent<'_>| {
            if let Some(callback) = progress_callback {
                callback(event);
            }
        };

        let mut outcome = MaterializeOutcome::new();
        let mut created: HashSet<PathBuf> = HashSet::new();

        for file in files {
            if self.shutdown.is_some_and(|s| !s.is_running()) {
                let handled = outcome.written_files.len() + outcome.errors.len();
                tracing::warn!(remaining = files.len() - handled, "interrupted, stopping early");
                outcome.cancelled = true;
                break;
            }

            match self.write_entry(root, &file.path, &file.content, &mut created) {
                Ok(new_directory) => {
                    if let Some(directory) = new_directory {
                        notify(MaterializeEvent::DirectoryCreated(&directory));
                        outcome.created_directories.push(directory);
                    }
                    tracing::debug!(path = %file.path, bytes = file.content.len(), "wrote file");
                    notify(MaterializeEvent::FileWritten(&file.path));
                    outcome.written_files.push(file.path.clone());
                }
                Err((new_directory, message)) => {
                    if let Some(directory) = new_directory {
                        notify(MaterializeEvent::DirectoryCreated(&directory));
                        outcome.created_directories.push(directory);
                    }
                    tracing::warn!(path = %file.path, error = %message, "failed to write file");
                    let failure = WriteFailure {
                        path: file.path.clone(),
                        message,
                    };
                    notify(MaterializeEvent::WriteFailed(&failure));
                    outcome.errors.push(failure);
                }
            }
        }

        Ok(outcome)
    }

    /// Writes one entry. Returns the parent directory (relative to `root`)
    /// when this call was the first in the run to create it.
    #[allow(clippy::type_complexity)]
    fn write_entry(
        &self,
        root: &Path,
        relative: &str,
        content: &str,
        created: &mut HashSet<PathBuf>,
    ) -> std::result::Result<Option<PathBuf>, (Option<PathBuf>, String)> {
        validate_destination_path(relative).map_err(|e| (None, e.to_string()))?;

        let full_path = root.join(relative);
        let mut new_directory = None;

        if let Some(parent) = full_path.parent() {
            if parent != root && !created.contains(parent) {
                fs::create_dir_all(parent).map_err(|e| (None, e.to_string()))?;
                created.insert(parent.to_path_buf());

                let relative_dir = parent.strip_prefix(root).unwrap_or(parent).to_path_buf();
                tracing::debug!(directory = %relative_dir.display(), "created directory");
                new_directory = Some(relative_dir);
            }
        }

        match fs::write(&full_path, content) {
            Ok(()) => Ok(new_directory),
            Err(e) => Err((new_directory, e.to_string())),
        }
    }
}

impl Default for Materializer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_destination_path(relative: &str) -> Result<()> {
    let path = Path::new(relative);

    // Security: Prevent directory traversal
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(Md2ProjectError::InvalidPath {
            path: format!("Directory traversal not allowed: {}", relative),
        });
    }

    if relative.chars().any(|c| c.is_control()) {
        return Err(Md2ProjectError::InvalidPath {
            path: format!("Path contains control characters: {:?}", relative),
        });
    }

    check_path_length(path)?;

    #[cfg(windows)]
    {
        let invalid_chars = ['<', '>', ':', '"', '|', '?', '*'];
        if relative.chars().any(|c| invalid_chars.contains(&c)) {
            return Err(Md2ProjectError::InvalidPath {
                path: format!("Path contains invalid characters: {}", relative),
            });
        }
    }

    Ok(())
}

// Check if path exceeds platform limits
fn check_path_length(path: &Path) -> Result<()> {
    let path_str = path.to_string_lossy();

    #[cfg(windows)]
    const MAX_PATH: usize = 260;

    #[cfg(not(windows))]
    const MAX_PATH: usize = 4096;

    if path_str.len() > MAX_PATH {
        Err(Md2ProjectError::InvalidPath {
            path: format!("Path too long: {} characters (max: {})", path_str.len(), MAX_PATH),
        })
    } else {
        Ok(())
    }
}
