use crate::error::{Md2ProjectError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    /// Documents larger than this many bytes are skipped.
    pub max_file_size: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Regular expressions matched against extracted paths; matches are skipped.
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub base_directory: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_directory: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Md2ProjectError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| Md2ProjectError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| Md2ProjectError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["md2project.toml", ".md2project.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref exclude) = cli_args.exclude_patterns {
            self.extraction
                .exclude_patterns
                .extend(exclude.iter().map(|p| p.trim().to_string()).filter(|p| !p.is_empty()));
        }

        if let Some(max_size) = cli_args.max_file_size {
            self.input.max_file_size = max_size;
        }

        if let Some(ref output_dir) = cli_args.output_dir {
            self.output.base_directory = output_dir.clone();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| Md2ProjectError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| Md2ProjectError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.max_file_size == 0 {
            return Err(Md2ProjectError::Config {
                message: "Maximum document size must be greater than 0".to_string(),
            });
        }

        for pattern in &self.extraction.exclude_patterns {
            Regex::new(pattern)?;
        }

        if self.output.base_directory.as_os_str().is_empty() {
            return Err(Md2ProjectError::Config {
                message: "Output directory must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub exclude_patterns: Option<Vec<String>>,
    pub max_file_size: Option<u64>,
    pub output_dir: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exclude_patterns(mut self, patterns: Option<Vec<String>>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    pub fn with_max_file_size(mut self, max_size: Option<u64>) -> Self {
        self.max_file_size = max_size;
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input.max_file_size, 10 * 1024 * 1024);
        assert!(config.extraction.exclude_patterns.is_empty());
        assert_eq!(config.output.base_directory, PathBuf::from("."));
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.input.max_file_size = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.extraction.exclude_patterns.push("(unclosed".to_string());
        assert!(matches!(config.validate(), Err(Md2ProjectError::Config { .. })));
    }

    #[test]
    fn test_config_file_operations() {
        let mut config = Config::default();
        config.input.max_file_size = 4096;
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded_config.input.max_file_size, 4096);
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[extraction]").unwrap();
        writeln!(temp_file, "exclude_patterns = [\"^docs/\"]").unwrap();

        let config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.extraction.exclude_patterns, vec!["^docs/"]);
        assert_eq!(config.input.max_file_size, 10 * 1024 * 1024);
        assert_eq!(config.output.base_directory, PathBuf::from("."));
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_from_file("/nonexistent/md2project.toml");
        assert!(matches!(result, Err(Md2ProjectError::Config { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();
        config.extraction.exclude_patterns.push("^vendor/".to_string());

        let overrides = CliOverrides::new()
            .with_max_file_size(Some(2048))
            .with_exclude_patterns(Some(vec![" \\.md$ ".to_string(), "".to_string()]))
            .with_output_dir(Some(PathBuf::from("my-project")));

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.input.max_file_size, 2048);
        assert_eq!(config.extraction.exclude_patterns, vec!["^vendor/", "\\.md$"]);
        assert_eq!(config.output.base_directory, PathBuf::from("my-project"));
    }

    #[test]
    fn test_default_config_file_lists_every_section() {
        let temp_file = NamedTempFile::new().unwrap();
        Config::default().save_to_file(temp_file.path()).unwrap();

        let sample = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(sample.contains("[input]"));
        assert!(sample.contains("[extraction]"));
        assert!(sample.contains("[output]"));
    }
}
