pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod materializer;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, ExtractionConfig, InputConfig, OutputConfig};
pub use error::{Md2ProjectError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{extract, is_command_transcript, ExtractedFile, ExtractionResult, Extractor, Strategy};
pub use materializer::{MaterializeEvent, MaterializeOutcome, Materializer, ProjectReport, WriteFailure};
pub use scanner::{DocumentReader, PathFilter, ReadOutcome};
pub use ui::{GracefulShutdown, OutputFormatter, OutputMode, ProgressManager};

use scanner::DocumentStatus;
use std::path::{Path, PathBuf};

/// Main library interface for md2project functionality
pub struct Md2Project {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    shutdown: GracefulShutdown,
}

impl Md2Project {
    /// Create a new Md2Project instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);
        let shutdown = GracefulShutdown::new()?;

        Ok(Self {
            config,
            output_formatter,
            progress_manager,
            shutdown,
        })
    }

    /// Create a new Md2Project instance for testing (no signal handler conflicts)
    #[cfg(test)]
    pub fn new_for_test(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(false);
        let shutdown = GracefulShutdown::new_for_test();

        Self {
            config,
            output_formatter,
            progress_manager,
            shutdown,
        }
    }

    /// Create Md2Project instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        Self::new(
            config,
            cli_args.output_format.into(),
            cli_args.verbose,
            cli_args.quiet,
        )
    }

    /// Reads every document and extracts the files they describe.
    ///
    /// Unreadable documents are reported and skipped. Fails with
    /// `NoFilesFound` when nothing could be extracted from the readable ones.
    pub fn analyze<P: AsRef<Path>>(&self, markdown_files: &[P]) -> Result<(ReadOutcome, ExtractionResult)> {
        self.output_formatter.print_banner();

        let reader = DocumentReader::new(&self.config.input);
        let read = reader.read_all(markdown_files);

        for status in &read.statuses {
            match status {
                DocumentStatus::Read(document) => self.output_formatter.document_read(document),
                DocumentStatus::Failed(failure) => self.output_formatter.document_failed(failure),
            }
        }
        self.shutdown.check_shutdown()?;

        let path_filter = PathFilter::new(&self.config.extraction)?;
        if path_filter.pattern_count() > 0 {
            self.output_formatter.debug(&format!(
                "Skipping paths matching {} exclude pattern(s)",
                path_filter.pattern_count()
            ));
        }

        let extracted = Extractor::new()
            .with_path_filter(path_filter)
            .extract(&read.combined);

        if extracted.skipped_transcripts() > 0 {
            self.output_formatter.debug(&format!(
                "Ignored {} command block(s)",
                extracted.skipped_transcripts()
            ));
        }

        if extracted.is_empty() {
            return Err(Md2ProjectError::NoFilesFound {
                documents_read: read.documents_read(),
            });
        }

        let paths: Vec<&str> = extracted.paths().collect();
        self.output_formatter.print_analysis(extracted.len(), &paths);

        Ok((read, extracted))
    }

    /// Reports what a run would create without touching the filesystem.
    pub fn plan_project(&self, read: &ReadOutcome, extracted: &ExtractionResult) -> ProjectReport {
        let report = ProjectReport::from_analysis(read, extracted);

        if self.output_formatter.mode() == OutputMode::Json {
            self.output_formatter.print_project_report(&report);
        } else {
            self.output_formatter.print_dry_run_notice();
            self.output_formatter.info("Run without --dry-run to create the files");
        }

        report
    }

    /// Writes the extracted files below the configured output directory.
    pub fn create_project(&self, read: &ReadOutcome, extracted: &ExtractionResult) -> Result<ProjectReport> {
        let root = self.config.output.base_directory.as_path();
        self.output_formatter
            .start_operation(&format!("Creating project in: {}", display_location(root).display()));

        let file_progress = self.progress_manager.create_file_progress(extracted.len() as u64);
        let progress_callback = |event: MaterializeEvent<'_>| {
            self.progress_manager.suspend(&file_progress, || match event {
                MaterializeEvent::DirectoryCreated(directory) => {
                    self.output_formatter.directory_created(directory)
                }
                MaterializeEvent::FileWritten(path) => self.output_formatter.file_created(path),
                MaterializeEvent::WriteFailed(failure) => self.output_formatter.write_failed(failure),
            });

            if !matches!(event, MaterializeEvent::DirectoryCreated(_)) {
                file_progress.inc(1);
            }
        };

        let materializer = Materializer::new().with_shutdown(&self.shutdown);
        let outcome = materializer.materialize_with_progress(extracted, root, Some(&progress_callback))?;

        ui::progress::finish_progress_with_summary(
            &file_progress,
            &format!("Wrote {} files", outcome.files_written()),
            outcome.elapsed(),
        );

        tracing::info!(
            directories = outcome.directories_created(),
            files = outcome.files_written(),
            errors = outcome.errors.len(),
            "project created"
        );

        let report = ProjectReport::from_analysis(read, extracted)
            .with_outcome(&outcome, &display_location(root));
        self.output_formatter.print_project_report(&report);

        Ok(report)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        Config::default().save_to_file(output_path)
    }

    /// Check if shutdown has been requested
    pub fn is_running(&self) -> bool {
        self.shutdown.is_running()
    }

    /// Request graceful shutdown
    pub fn request_shutdown(&self) {
        self.shutdown.request_shutdown();
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &Md2ProjectError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

// Absolute form of the output root when it exists, as given otherwise.
fn display_location(root: &Path) -> PathBuf {
    std::fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DESIGN_DOC: &str = "# Design\n\n**src/main.py**\n```python\nprint(\"hi\")\n```\n\n### config/app.json\n```json\n{}\n```\n";

    fn project_in(output: &Path) -> Md2Project {
        let mut config = Config::default();
        config.output.base_directory = output.to_path_buf();
        Md2Project::new_for_test(config, OutputMode::Plain, 0, true)
    }

    fn write_doc(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_md2project_creation() {
        let md2project = Md2Project::new_for_test(Config::default(), OutputMode::Human, 1, false);
        assert!(md2project.is_running());
        assert_eq!(md2project.config.output.base_directory, PathBuf::from("."));
    }

    #[test]
    fn test_analyze_and_create_project() {
        let docs = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let doc = write_doc(&docs, "design.md", DESIGN_DOC);

        let md2project = project_in(output.path());
        let (read, extracted) = md2project.analyze(&[doc]).unwrap();
        assert_eq!(read.documents_read(), 1);
        assert_eq!(extracted.len(), 2);

        let report = md2project.create_project(&read, &extracted).unwrap();
        assert!(!report.dry_run);
        assert_eq!(report.files_written, 2);
        assert_eq!(report.directories_created, 2);
        assert!(!report.has_errors());

        let main_py = fs::read_to_string(output.path().join("src/main.py")).unwrap();
        assert_eq!(main_py, "print(\"hi\")");
        assert!(output.path().join("config/app.json").exists());
    }

    #[test]
    fn test_analyze_without_files_fails() {
        let docs = TempDir::new().unwrap();
        let doc = write_doc(&docs, "notes.md", "# Notes\n\nNothing to build here.\n");

        let md2project = project_in(docs.path());
        let result = md2project.analyze(&[doc]);
        assert!(matches!(
            result,
            Err(Md2ProjectError::NoFilesFound { documents_read: 1 })
        ));
    }

    #[test]
    fn test_analyze_skips_unreadable_document() {
        let docs = TempDir::new().unwrap();
        let missing = docs.path().join("missing.md");
        let doc = write_doc(&docs, "design.md", DESIGN_DOC);

        let md2project = project_in(docs.path());
        let (read, extracted) = md2project.analyze(&[missing, doc]).unwrap();
        assert_eq!(read.documents_read(), 1);
        assert_eq!(read.failures().count(), 1);
        assert_eq!(extracted.len(), 2);
    }

    #[test]
    fn test_plan_project_writes_nothing() {
        let docs = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let doc = write_doc(&docs, "design.md", DESIGN_DOC);

        let md2project = project_in(&output.path().join("planned"));
        let (read, extracted) = md2project.analyze(&[doc]).unwrap();
        let report = md2project.plan_project(&read, &extracted);

        assert!(report.dry_run);
        assert_eq!(report.files.len(), 2);
        assert!(!output.path().join("planned").exists());
    }

    #[test]
    fn test_exclude_patterns_applied() {
        let docs = TempDir::new().unwrap();
        let doc = write_doc(&docs, "design.md", DESIGN_DOC);

        let mut config = Config::default();
        config.extraction.exclude_patterns = vec!["^config/".to_string()];
        let md2project = Md2Project::new_for_test(config, OutputMode::Plain, 0, true);

        let (_, extracted) = md2project.analyze(&[doc]).unwrap();
        assert_eq!(extracted.paths().collect::<Vec<_>>(), vec!["src/main.py"]);
    }

    #[test]
    fn test_create_project_after_shutdown_is_cancelled() {
        let docs = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let doc = write_doc(&docs, "design.md", DESIGN_DOC);

        let md2project = project_in(output.path());
        let (read, extracted) = md2project.analyze(&[doc]).unwrap();
        md2project.request_shutdown();

        let report = md2project.create_project(&read, &extracted).unwrap();
        assert!(report.cancelled);
        assert_eq!(report.files_written, 0);
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sample.toml");

        Md2Project::generate_sample_config(&config_path).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[input]"));
        assert!(content.contains("[extraction]"));
        assert!(content.contains("[output]"));
    }
}
