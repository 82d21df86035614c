use crate::extractor::{ExtractionResult, Strategy};
use crate::materializer::{MaterializeOutcome, WriteFailure};
use crate::scanner::ReadOutcome;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// Serializable summary of one run, used for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectReport {
    pub generated_at: DateTime<Utc>,
    pub dry_run: bool,
    pub documents: Vec<DocumentInfo>,
    pub document_errors: Vec<DocumentError>,
    pub files: Vec<FileInfo>,
    pub skipped_command_blocks: usize,
    pub output_directory: Option<String>,
    pub directories_created: usize,
    pub files_written: usize,
    pub errors: Vec<WriteFailure>,
    pub cancelled: bool,
    pub duration_ms: u128,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentInfo {
    pub path: String,
    pub characters: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentError {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    pub path: String,
    pub bytes: usize,
    pub strategy: Strategy,
}

impl ProjectReport {
    /// Report for a run that stopped after extraction.
    pub fn from_analysis(read: &ReadOutcome, extracted: &ExtractionResult) -> Self {
        Self {
            generated_at: Utc::now(),
            dry_run: true,
            documents: read
                .documents()
                .map(|doc| DocumentInfo {
                    path: doc.display_path(),
                    characters: doc.characters,
                })
                .collect(),
            document_errors: read
                .failures()
                .map(|failure| DocumentError {
                    path: failure.path.display().to_string(),
                    message: failure.message.clone(),
                })
                .collect(),
            files: extracted
                .iter()
                .map(|file| FileInfo {
                    path: file.path.clone(),
                    bytes: file.content.len(),
                    strategy: file.strategy,
                })
                .collect(),
            skipped_command_blocks: extracted.skipped_transcripts(),
            output_directory: None,
            directories_created: 0,
            files_written: 0,
            errors: Vec::new(),
            cancelled: false,
            duration_ms: 0,
        }
    }

    /// Adds the materialization results to an analysis report.
    pub fn with_outcome(mut self, outcome: &MaterializeOutcome, location: &Path) -> Self {
        self.dry_run = false;
        self.output_directory = Some(location.display().to_string());
        self.directories_created = outcome.directories_created();
        self.files_written = outcome.files_written();
        self.errors = outcome.errors.clone();
        self.cancelled = outcome.cancelled;
        self.duration_ms = outcome.elapsed().as_millis();
        self
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || !self.document_errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::extract;
    use crate::materializer::Materializer;
    use tempfile::TempDir;

    #[test]
    fn test_analysis_report() {
        let extracted = extract("**a.txt**\n```\nhello\n```\n## b.txt\n```\nworld!\n```");
        let report = ProjectReport::from_analysis(&ReadOutcome::default(), &extracted);

        assert!(report.dry_run);
        assert_eq!(report.files.len(), 2);
        assert_eq!(report.files[0].path, "a.txt");
        assert_eq!(report.files[0].bytes, 5);
        assert_eq!(report.files[1].strategy, Strategy::Heading);
        assert!(report.output_directory.is_none());
        assert!(!report.has_errors());
    }

    #[test]
    fn test_report_with_outcome_serializes() {
        let temp_dir = TempDir::new().unwrap();
        let extracted = extract("**src/a.txt**\n```\nhello\n```");
        let outcome = Materializer::new().materialize(&extracted, temp_dir.path()).unwrap();

        let report = ProjectReport::from_analysis(&ReadOutcome::default(), &extracted)
            .with_outcome(&outcome, temp_dir.path());

        assert!(!report.dry_run);
        assert_eq!(report.files_written, 1);
        assert_eq!(report.directories_created, 1);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["files_written"], 1);
        assert_eq!(json["files"][0]["strategy"], "emphasized_filename");
    }
}
