use crate::extractor::command_filter::is_command_transcript;
use crate::extractor::fence::trim_space;
use crate::extractor::strategy::Strategy;
use crate::scanner::PathFilter;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// A file recovered from the document: its relative path and its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFile {
    pub path: String,
    pub content: String,
    /// Strategy whose match produced the stored content.
    pub strategy: Strategy,
}

/// Paths mapped to their extracted files, kept in path order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    files: BTreeMap<String, ExtractedFile>,
    skipped_transcripts: usize,
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a file, replacing any earlier entry for the same path.
    pub fn insert(&mut self, file: ExtractedFile) -> Option<ExtractedFile> {
        self.files.insert(file.path.clone(), file)
    }

    pub fn get(&self, path: &str) -> Option<&ExtractedFile> {
        self.files.get(path)
    }

    pub fn content(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(|file| file.content.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Paths in lexicographic order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Values<'_, String, ExtractedFile> {
        self.files.values()
    }

    /// Number of candidate bodies dropped as terminal transcripts.
    pub fn skipped_transcripts(&self) -> usize {
        self.skipped_transcripts
    }
}

impl<'a> IntoIterator for &'a ExtractionResult {
    type Item = &'a ExtractedFile;
    type IntoIter = btree_map::Values<'a, String, ExtractedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Fixture builder for tests; real entries always carry the strategy that found them.
#[cfg(test)]
impl FromIterator<(String, String)> for ExtractionResult {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut result = Self::new();
        for (path, content) in iter {
            result.insert(ExtractedFile {
                path,
                content,
                strategy: Strategy::EmphasizedFilename,
            });
        }
        result
    }
}

/// Pairs file-path markers with the fenced code blocks that follow them.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    path_filter: PathFilter,
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path_filter(mut self, path_filter: PathFilter) -> Self {
        self.path_filter = path_filter;
        self
    }

    /// Runs every strategy over `text` in priority order.
    ///
    /// Never fails: text without any recognizable marker yields an empty
    /// result.
    pub fn extract(&self, text: &str) -> ExtractionResult {
        let mut result = ExtractionResult::new();

        for strategy in Strategy::PRIORITY {
            let matches = strategy.find_all(text);
            tracing::debug!(%strategy, matches = matches.len(), "strategy pass complete");

            for found in matches {
                let path = trim_space(found.path);
                let content = trim_space(found.body);

                if !self.path_filter.accepts(path) {
                    tracing::debug!(path, %strategy, "path rejected by filter");
                    continue;
                }

                if is_command_transcript(content) {
                    tracing::debug!(path, offset = found.start, "discarding command transcript");
                    result.skipped_transcripts += 1;
                    continue;
                }

                let previous = result.insert(ExtractedFile {
                    path: path.to_string(),
                    content: content.to_string(),
                    strategy,
                });
                if let Some(previous) = previous {
                    tracing::debug!(
                        path,
                        replaced = %previous.strategy,
                        by = %strategy,
                        "later match overwrites earlier entry"
                    );
                }
            }
        }

        tracing::info!(files = result.len(), "extraction finished");
        result
    }
}

/// Extracts with the default (unfiltered) configuration.
pub fn extract(text: &str) -> ExtractionResult {
    Extractor::new().extract(text)
}
