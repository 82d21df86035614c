use clap::Parser;
use md2project::{Cli, Md2Project, Md2ProjectError, OutputFormatter, OutputMode, UserFriendlyError};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    // Parse CLI arguments
    let cli = Cli::parse();
    setup_logging(cli.verbosity_level());

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let md2project = match Md2Project::from_cli(&cli) {
        Ok(md2project) => md2project,
        Err(e) => {
            print_startup_error(&e, cli.output_format.into());
            return 1;
        }
    };

    let (read, extracted) = match md2project.analyze(&cli.markdown_files) {
        Ok(analysis) => analysis,
        Err(e) => {
            md2project.handle_error(&e);
            return exit_code_for(&e);
        }
    };

    if cli.dry_run {
        md2project.plan_project(&read, &extracted);
        return 0;
    }

    match md2project.create_project(&read, &extracted) {
        Ok(report) if report.cancelled => 130,
        // Individual write failures are already reported; the run still succeeded.
        Ok(_) => 0,
        Err(e) => {
            md2project.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &Md2ProjectError) -> i32 {
    match error {
        Md2ProjectError::Cancelled => 130, // Interrupted (SIGINT)
        _ => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "md2project.toml".to_string());

    match Md2Project::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  md2project <markdown-files>... --config {}", config_path);
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &Md2ProjectError, mode: OutputMode) {
    let formatter = OutputFormatter::new(mode, 0, false);
    formatter.print_user_friendly_error(error);
}

// The formatter already reports every failure, so diagnostics stay silent by default.
fn default_log_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "md2project=off",
        1 => "md2project=warn",
        2 => "md2project=info",
        _ => "md2project=debug",
    }
}

fn setup_logging(verbosity: u8) {
    // RUST_LOG wins over -v
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_directive(verbosity))),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let cli = Cli::try_parse_from([
            "md2project",
            "--generate-config",
            "--config",
            config_path.to_str().unwrap(),
        ])
        .unwrap();

        let exit_code = handle_generate_config(&cli);
        assert_eq!(exit_code, 0);

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[input]"));
        assert!(content.contains("max_file_size"));
    }

    #[test]
    fn test_generate_config_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("missing").join("test.toml");

        let cli = Cli::try_parse_from([
            "md2project",
            "--generate-config",
            "--config",
            config_path.to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(handle_generate_config(&cli), 1);
    }

    #[test]
    fn test_log_directive_follows_verbosity() {
        assert_eq!(default_log_directive(0), "md2project=off");
        assert_eq!(default_log_directive(1), "md2project=warn");
        assert_eq!(default_log_directive(2), "md2project=info");
        assert_eq!(default_log_directive(5), "md2project=debug");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code_for(&Md2ProjectError::Cancelled), 130);
        assert_eq!(
            exit_code_for(&Md2ProjectError::NoFilesFound { documents_read: 1 }),
            1
        );
        assert_eq!(
            exit_code_for(&Md2ProjectError::Config {
                message: "bad".to_string()
            }),
            1
        );
    }
}
