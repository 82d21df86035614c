use thiserror::Error;

#[derive(Error, Debug)]
pub enum Md2ProjectError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {path}: {source}")]
    DocumentRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File too large: {size} bytes (max: {max_size} bytes)")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("No files found in markdown")]
    NoFilesFound { documents_read: usize },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Cannot create output directory {path}: {source}")]
    OutputRoot {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Operation was cancelled by user")]
    Cancelled,
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for Md2ProjectError {
    fn user_message(&self) -> String {
        match self {
            Md2ProjectError::DocumentRead { path, source } => {
                format!("Error reading {}: {}", path, source)
            }
            Md2ProjectError::FileTooLarge { size, max_size } => {
                format!(
                    "File too large: {} (maximum allowed: {})",
                    format_bytes(*size),
                    format_bytes(*max_size)
                )
            }
            Md2ProjectError::NoFilesFound { .. } => {
                "No files found in markdown. Check the format.".to_string()
            }
            Md2ProjectError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            Md2ProjectError::OutputRoot { path, source } => {
                format!("Cannot create output directory {}: {}", path, source)
            }
            Md2ProjectError::InvalidPath { path } => {
                format!("Invalid file path: {}", path)
            }
            Md2ProjectError::Cancelled => "Operation was cancelled by user".to_string(),
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            Md2ProjectError::NoFilesFound { documents_read: 0 } => Some(
                "None of the input documents could be read. Check the paths and permissions.".to_string()
            ),
            Md2ProjectError::NoFilesFound { .. } => Some(
                "Mark each file with **path/to/file.ext**, a ## path/to/file.ext heading or `path/to/file.ext`, directly followed by a fenced code block.".to_string()
            ),
            Md2ProjectError::FileTooLarge { .. } => Some(
                "Increase the maximum document size with --max-size or split the document.".to_string()
            ),
            Md2ProjectError::Config { .. } => Some(
                "Check your configuration file syntax and the --exclude patterns.".to_string()
            ),
            Md2ProjectError::OutputRoot { .. } => Some(
                "Ensure you have write permission for the target directory or choose another one with --output.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<regex::Error> for Md2ProjectError {
    fn from(error: regex::Error) -> Self {
        Md2ProjectError::Config {
            message: format!("Invalid exclude pattern: {}", error),
        }
    }
}

pub type Result<T> = std::result::Result<T, Md2ProjectError>;

pub(crate) fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
