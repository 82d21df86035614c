use crate::config::ExtractionConfig;
use crate::error::Result;
use regex::Regex;
use std::path::{Component, Path};

/// Decides which extracted paths may enter the extraction result.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    exclude_patterns: Vec<Regex>,
}

impl PathFilter {
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        let exclude_patterns = config
            .exclude_patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { exclude_patterns })
    }

    pub fn accepts(&self, path: &str) -> bool {
        !is_absolute_path(path) && !self.is_excluded(path)
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclude_patterns.iter().any(|pattern| pattern.is_match(path))
    }

    pub fn pattern_count(&self) -> usize {
        self.exclude_patterns.len()
    }
}

/// Absolute paths would escape the output root when joined onto it.
pub fn is_absolute_path(path: &str) -> bool {
    if path.starts_with('/') || path.starts_with('\\') {
        return true;
    }

    let path = Path::new(path);
    path.has_root() || matches!(path.components().next(), Some(Component::Prefix(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(patterns: &[&str]) -> PathFilter {
        let config = ExtractionConfig {
            exclude_patterns: patterns.iter().map(|p| p.to_string()).collect(),
        };
        PathFilter::new(&config).unwrap()
    }

    #[test]
    fn test_default_filter_accepts_relative_paths() {
        let filter = PathFilter::default();
        assert!(filter.accepts("app.py"));
        assert!(filter.accepts("src/components/App.tsx"));
        assert!(filter.accepts("./relative.txt"));
        assert_eq!(filter.pattern_count(), 0);
    }

    #[test]
    fn test_absolute_paths_rejected() {
        let filter = PathFilter::default();
        assert!(!filter.accepts("/etc/hosts.txt"));
        assert!(!filter.accepts("\\windows\\system.ini.txt"));
    }

    #[test]
    fn test_exclude_patterns() {
        let filter = filter(&[r"^docs/", r"\.md$"]);
        assert!(filter.is_excluded("docs/guide.txt"));
        assert!(filter.is_excluded("README.md"));
        assert!(!filter.is_excluded("src/docs.py"));
        assert_eq!(filter.pattern_count(), 2);
    }

    #[test]
    fn test_invalid_pattern() {
        let config = ExtractionConfig {
            exclude_patterns: vec!["[unclosed".to_string()],
        };
        assert!(PathFilter::new(&config).is_err());
    }
}
