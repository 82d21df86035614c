use crate::config::InputConfig;
use crate::error::{Md2ProjectError, Result, UserFriendlyError};
use std::fs;
use std::path::{Path, PathBuf};

/// Separator placed in front of every document in the combined text.
pub const DOCUMENT_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone)]
pub struct DocumentFile {
    pub path: PathBuf,
    pub size: u64,
    /// Length of the content in characters.
    pub characters: usize,
}

impl DocumentFile {
    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Debug, Clone)]
pub struct DocumentFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Per-document result, in input order.
#[derive(Debug, Clone)]
pub enum DocumentStatus {
    Read(DocumentFile),
    Failed(DocumentFailure),
}

#[derive(Debug, Clone, Default)]
pub struct ReadOutcome {
    pub combined: String,
    pub statuses: Vec<DocumentStatus>,
}

impl ReadOutcome {
    pub fn documents(&self) -> impl Iterator<Item = &DocumentFile> {
        self.statuses.iter().filter_map(|status| match status {
            DocumentStatus::Read(doc) => Some(doc),
            DocumentStatus::Failed(_) => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = &DocumentFailure> {
        self.statuses.iter().filter_map(|status| match status {
            DocumentStatus::Failed(failure) => Some(failure),
            DocumentStatus::Read(_) => None,
        })
    }

    pub fn documents_read(&self) -> usize {
        self.documents().count()
    }
}

/// Reads input documents and concatenates the readable ones.
pub struct DocumentReader {
    max_file_size: u64,
}

impl DocumentReader {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            max_file_size: config.max_file_size,
        }
    }

    /// Reads every path in order. Unreadable documents are recorded and
    /// skipped; this never fails as a whole.
    pub fn read_all<P: AsRef<Path>>(&self, paths: &[P]) -> ReadOutcome {
        let mut outcome = ReadOutcome::default();

        for path in paths {
            let path = path.as_ref();
            match self.read_document(path) {
                Ok(content) => {
                    let document = DocumentFile {
                        path: path.to_path_buf(),
                        size: content.len() as u64,
                        characters: content.chars().count(),
                    };
                    tracing::debug!(path = %path.display(), bytes = document.size, "read document");

                    outcome.combined.push_str(DOCUMENT_SEPARATOR);
                    outcome.combined.push_str(&content);
                    outcome.statuses.push(DocumentStatus::Read(document));
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping unreadable document");
                    let message = match err {
                        Md2ProjectError::DocumentRead { .. } => err.user_message(),
                        _ => format!("Error reading {}: {}", path.display(), err.user_message()),
                    };
                    outcome.statuses.push(DocumentStatus::Failed(DocumentFailure {
                        path: path.to_path_buf(),
                        message,
                    }));
                }
            }
        }

        outcome
    }

    fn read_document(&self, path: &Path) -> Result<String> {
        let read_error = |source: std::io::Error| Md2ProjectError::DocumentRead {
            path: path.display().to_string(),
            source,
        };

        let metadata = fs::metadata(path).map_err(read_error)?;
        if metadata.len() > self.max_file_size {
            return Err(Md2ProjectError::FileTooLarge {
                size: metadata.len(),
                max_size: self.max_file_size,
            });
        }

        fs::read_to_string(path).map_err(read_error)
    }
}
