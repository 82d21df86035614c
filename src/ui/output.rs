use crate::error::{Md2ProjectError, UserFriendlyError};
use crate::materializer::{ProjectReport, WriteFailure};
use crate::scanner::{DocumentFailure, DocumentFile};
use crate::ui::progress::format_duration;
use console::{style, Emoji, Term};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");
static PACKAGE: Emoji = Emoji("📦 ", "");
static CHART: Emoji = Emoji("📊 ", "");
static CLIPBOARD: Emoji = Emoji("📋 ", "");
static MAGNIFIER: Emoji = Emoji("🔍 ", "");
static FOLDER: Emoji = Emoji("📁 ", "+ ");
static DOCUMENT: Emoji = Emoji("📄 ", "+ ");

const BANNER_WIDTH: usize = 70;

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    // Core messaging methods
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        match self.mode {
            OutputMode::Human => {
                println!();
                if self.use_colors {
                    println!("{}{}", ROCKET, style(operation).bold());
                } else {
                    println!("> {}", operation);
                }
                println!();
            }
            OutputMode::Json => self.print_json_message("operation_start", operation),
            OutputMode::Plain => println!("STARTING: {}", operation),
        }
    }

    // User-friendly error handling
    pub fn print_user_friendly_error(&self, error: &Md2ProjectError) {
        let user_message = error.user_message();
        self.error(&user_message);

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    pub fn print_banner(&self) {
        if self.quiet || self.mode != OutputMode::Human {
            return;
        }

        println!("{}", "=".repeat(BANNER_WIDTH));
        if self.use_colors {
            println!("{}{}", PACKAGE, style("Markdown to Project Structure Utility").bold().cyan());
        } else {
            println!("{}Markdown to Project Structure Utility", PACKAGE);
        }
        println!("{}", "=".repeat(BANNER_WIDTH));
        println!();
    }

    // Per-item progress, hidden in quiet mode
    pub fn document_read(&self, document: &DocumentFile) {
        if !self.should_show_message(0) {
            return;
        }

        match self.mode {
            OutputMode::Human => self.print_human_message(
                MessageType::Success,
                &format!("Read {} ({} characters)", document.display_path(), document.characters),
            ),
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "document_read",
                "path": document.display_path(),
                "characters": document.characters,
            })),
            OutputMode::Plain => println!(
                "READ: {} ({} characters)",
                document.display_path(),
                document.characters
            ),
        }
    }

    pub fn document_failed(&self, failure: &DocumentFailure) {
        self.error(&failure.message);
    }

    pub fn directory_created(&self, directory: &Path) {
        if !self.should_show_message(0) {
            return;
        }

        match self.mode {
            OutputMode::Human => println!("{}Created directory: {}", FOLDER, directory.display()),
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "directory_created",
                "path": directory.display().to_string(),
            })),
            OutputMode::Plain => println!("CREATED DIR: {}", directory.display()),
        }
    }

    pub fn file_created(&self, path: &str) {
        if !self.should_show_message(0) {
            return;
        }

        match self.mode {
            OutputMode::Human => println!("{}Created file: {}", DOCUMENT, path),
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "file_created",
                "path": path,
            })),
            OutputMode::Plain => println!("CREATED FILE: {}", path),
        }
    }

    pub fn write_failed(&self, failure: &WriteFailure) {
        self.error(&format!("Error creating {}: {}", failure.path, failure.message));
    }

    // Summary and reporting
    pub fn print_analysis(&self, file_count: usize, paths: &[&str]) {
        match self.mode {
            OutputMode::Human => {
                println!();
                println!("{}Analysis complete: Found {} files", CHART, file_count);

                if self.should_show_message(0) {
                    println!();
                    println!("{}Files to be created:", CLIPBOARD);
                    for path in paths {
                        println!("   {}", path);
                    }
                }
            }
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "analysis",
                "files_found": file_count,
                "files": paths,
            })),
            OutputMode::Plain => {
                println!("FOUND: {} files", file_count);
                if self.should_show_message(0) {
                    for path in paths {
                        println!("FILE: {}", path);
                    }
                }
            }
        }
    }

    pub fn print_dry_run_notice(&self) {
        match self.mode {
            OutputMode::Human => {
                println!();
                println!("{}Dry run mode - no files created", MAGNIFIER);
            }
            OutputMode::Json => self.print_json_message("info", "Dry run mode - no files created"),
            OutputMode::Plain => println!("DRY RUN: no files created"),
        }
    }

    pub fn print_project_report(&self, report: &ProjectReport) {
        match self.mode {
            OutputMode::Human => self.print_human_report(report),
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Plain => self.print_plain_report(report),
        }
    }

    pub fn print_separator(&self) {
        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}", style("=".repeat(BANNER_WIDTH)).dim());
                } else {
                    println!("{}", "=".repeat(BANNER_WIDTH));
                }
            }
            OutputMode::Plain => {
                println!("{}", "-".repeat(60));
            }
            OutputMode::Json => {} // No separator in JSON mode
        }
    }

    // Private helper methods
    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Success => (CHECKMARK, Box::new(|msg| style(msg).green().bold())),
                MessageType::Error => (CROSS, Box::new(|msg| style(msg).red().bold())),
                MessageType::Warning => (WARNING, Box::new(|msg| style(msg).yellow().bold())),
                MessageType::Info => (INFO, Box::new(|msg| style(msg).cyan())),
            };

        if self.use_colors {
            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, color_fn(message)),
                _ => println!("{}{}", emoji, color_fn(message)),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_human_report(&self, report: &ProjectReport) {
        println!();
        self.print_separator();

        if report.cancelled {
            self.print_human_message(MessageType::Warning, "Interrupted before all files were written");
        } else if self.use_colors {
            println!("{}{}", CHECKMARK, style("Project created successfully!").green().bold());
        } else {
            println!("{}Project created successfully!", CHECKMARK);
        }

        let count = |value: usize| {
            if self.use_colors {
                style(value).cyan().bold().to_string()
            } else {
                value.to_string()
            }
        };

        println!("   Directories: {}", count(report.directories_created));
        println!("   Files: {}", count(report.files_written));
        if !report.errors.is_empty() {
            println!("   Errors: {}", count(report.errors.len()));
        }
        if let Some(ref location) = report.output_directory {
            println!("   Location: {}", location);
        }
        if self.verbose_level > 0 {
            println!(
                "   Time taken: {}",
                format_duration(Duration::from_millis(report.duration_ms as u64))
            );
        }

        self.print_separator();
    }

    fn print_plain_report(&self, report: &ProjectReport) {
        if report.cancelled {
            println!("INTERRUPTED: Project partially created");
        } else {
            println!("COMPLETED: Project created");
        }
        println!("Directories: {}", report.directories_created);
        println!("Files: {}", report.files_written);
        if !report.errors.is_empty() {
            println!("Errors: {}", report.errors.len());
        }
        if let Some(ref location) = report.output_directory {
            println!("Location: {}", location);
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatter_creation() {
        let formatter = OutputFormatter::new(OutputMode::Human, 1, false);
        assert_eq!(formatter.mode(), OutputMode::Human);
        assert_eq!(formatter.verbose_level, 1);
        assert!(!formatter.is_quiet());
    }

    #[test]
    fn test_quiet_mode() {
        let formatter = OutputFormatter::new(OutputMode::Human, 2, true);
        assert_eq!(formatter.verbose_level, 0);
        assert!(formatter.is_quiet());
        assert!(!formatter.use_colors);
    }

    #[test]
    fn test_should_show_message() {
        let formatter = OutputFormatter::new(OutputMode::Plain, 1, false);
        assert!(formatter.should_show_message(0));
        assert!(formatter.should_show_message(1));
        assert!(!formatter.should_show_message(2));

        let quiet_formatter = OutputFormatter::new(OutputMode::Plain, 1, true);
        assert!(!quiet_formatter.should_show_message(0));
        assert!(!quiet_formatter.should_show_message(1));
    }

    #[test]
    fn test_json_mode_disables_colors() {
        let formatter = OutputFormatter::new(OutputMode::Json, 0, false);
        assert!(!formatter.use_colors);
    }
}
