//! Scanning primitives shared by the extraction strategies.
//!
//! All delimiters are ASCII, so every offset returned here falls on a char
//! boundary of the scanned text.

/// Delimiter that opens and closes a fenced code block.
pub const FENCE: &str = "```";

/// Suffixes a captured path must end with (after a `.`) to be accepted.
pub const RECOGNIZED_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "json", "css", "html", "md", "py", "go", "sh", "yaml", "yml",
    "toml", "txt", "env", "gitignore",
];

/// A fenced code block located in the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FencedBlock<'a> {
    /// Raw text between the opening line and the closing delimiter.
    pub body: &'a str,
    /// Offset just past the closing delimiter.
    pub end: usize,
}

/// Whitespace as understood by the extractor: Unicode whitespace plus the
/// ASCII information separators, which documents exported from some editors
/// use as line separators.
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Trims extractor whitespace from both ends.
pub fn trim_space(text: &str) -> &str {
    text.trim_matches(is_space)
}

/// Byte length of the whitespace run starting at `pos`.
pub fn whitespace_run(text: &str, pos: usize) -> usize {
    run_length(text, pos, is_space)
}

fn run_length(text: &str, pos: usize, accept: fn(char) -> bool) -> usize {
    let rest = &text[pos..];
    rest.char_indices()
        .find(|&(_, c)| !accept(c))
        .map_or(rest.len(), |(offset, _)| offset)
}

/// True when `name` is at least one character followed by `.` and a
/// recognized extension.
pub fn has_recognized_extension(name: &str) -> bool {
    RECOGNIZED_EXTENSIONS.iter().any(|ext| {
        name.len() > ext.len() + 1
            && name.ends_with(ext)
            && name[..name.len() - ext.len()].ends_with('.')
    })
}

/// Matches a fenced block starting exactly at `pos`.
///
/// The opening delimiter may carry a word-character language tag and must be
/// followed by whitespace containing at least one newline. The body runs up
/// to the next closing delimiter; a block without one never matches.
pub fn match_fenced_block(text: &str, pos: usize) -> Option<FencedBlock<'_>> {
    if !text.get(pos..)?.starts_with(FENCE) {
        return None;
    }

    let mut cursor = pos + FENCE.len();
    cursor += run_length(text, cursor, is_word);

    let spacing = &text[cursor..cursor + whitespace_run(text, cursor)];
    let body_start = cursor + spacing.rfind('\n')? + 1;

    let body_end = body_start + text[body_start..].find(FENCE)?;
    Some(FencedBlock {
        body: &text[body_start..body_end],
        end: body_end + FENCE.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_extensions() {
        assert!(has_recognized_extension("app.py"));
        assert!(has_recognized_extension("src/components/App.tsx"));
        assert!(has_recognized_extension("frontend/.gitignore"));
        assert!(has_recognized_extension("config/.env"));

        assert!(!has_recognized_extension(".gitignore"));
        assert!(!has_recognized_extension("main.rs"));
        assert!(!has_recognized_extension("Makefile"));
        assert!(!has_recognized_extension("apppy"));
        assert!(!has_recognized_extension(".py"));
    }

    #[test]
    fn test_fenced_block_with_language_tag() {
        let text = "```python\nprint(1)\n\nprint(2)\n```\ntrailing";
        let block = match_fenced_block(text, 0).unwrap();
        assert_eq!(block.body, "print(1)\n\nprint(2)\n");
        assert_eq!(&text[block.end..], "\ntrailing");
    }

    #[test]
    fn test_fenced_block_stops_at_first_closing_fence() {
        let text = "```\nfirst\n```\n```\nsecond\n```";
        let block = match_fenced_block(text, 0).unwrap();
        assert_eq!(block.body, "first\n");
    }

    #[test]
    fn test_fenced_block_requires_newline_after_tag() {
        assert!(match_fenced_block("```js title=\"x\"\ncode\n```", 0).is_none());
        assert!(match_fenced_block("```c++\ncode\n```", 0).is_none());
        assert!(match_fenced_block("```js code```", 0).is_none());
    }

    #[test]
    fn test_unterminated_fence() {
        assert!(match_fenced_block("```js\nconst a = 1;\n", 0).is_none());
    }

    #[test]
    fn test_empty_body() {
        let block = match_fenced_block("```\n```", 0).unwrap();
        assert_eq!(block.body, "");
    }

    #[test]
    fn test_whitespace_helpers() {
        assert_eq!(whitespace_run("  \n\tx", 0), 4);
        assert_eq!(whitespace_run("x", 0), 0);
        assert_eq!(whitespace_run("a\u{a0}b", 1), 2);
        assert_eq!(trim_space("\u{1f} body \n"), "body");
    }
}
