use crate::extractor::fence::{
    has_recognized_extension, is_space, match_fenced_block, whitespace_run, FencedBlock,
};
use serde::Serialize;
use std::fmt;

/// One of the independent passes that pair a path marker with a fenced block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// `**path/to/file.ext**`, optionally followed by a `[annotation]`.
    EmphasizedFilename,
    /// `## path/to/file.ext` or `### path/to/file.ext`.
    Heading,
    /// `` `path/to/file.ext` ``.
    InlineCode,
}

/// A path/body pair produced by a single strategy, before trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMatch<'a> {
    pub start: usize,
    pub end: usize,
    pub path: &'a str,
    pub body: &'a str,
}

impl Strategy {
    /// Evaluation order. Later strategies overwrite earlier ones on path collisions.
    pub const PRIORITY: [Strategy; 3] = [
        Strategy::EmphasizedFilename,
        Strategy::Heading,
        Strategy::InlineCode,
    ];

    fn marker(self) -> &'static str {
        match self {
            Strategy::EmphasizedFilename => "**",
            Strategy::Heading => "##",
            Strategy::InlineCode => "`",
        }
    }

    /// Scans the whole text and returns every non-overlapping match in order.
    ///
    /// Each occurrence of the strategy's marker is a candidate start. A
    /// successful match resumes scanning at its end, a failed one a single
    /// character later.
    pub fn find_all(self, text: &str) -> Vec<RawMatch<'_>> {
        let marker = self.marker();
        let mut matches = Vec::new();
        let mut from = 0;

        while let Some(offset) = text.get(from..).and_then(|rest| rest.find(marker)) {
            let start = from + offset;
            match self.match_at(text, start) {
                Some(found) => {
                    from = found.end;
                    matches.push(found);
                }
                None => from = start + 1,
            }
        }

        matches
    }

    /// Attempts a match starting exactly at `start`, where the marker sits.
    pub fn match_at(self, text: &str, start: usize) -> Option<RawMatch<'_>> {
        match self {
            Strategy::EmphasizedFilename => match_emphasized(text, start),
            Strategy::Heading => match_heading(text, start, 3).or_else(|| match_heading(text, start, 2)),
            Strategy::InlineCode => match_inline_code(text, start),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::EmphasizedFilename => "emphasized filename",
            Strategy::Heading => "heading",
            Strategy::InlineCode => "inline code",
        };
        f.write_str(name)
    }
}

fn raw_match<'a>(start: usize, path: &'a str, block: FencedBlock<'a>) -> RawMatch<'a> {
    RawMatch {
        start,
        end: block.end,
        path,
        body: block.body,
    }
}

/// Text between `open_len` bytes past `start` and the next `delimiter`.
fn delimited_name(text: &str, start: usize, open_len: usize, delimiter: char) -> Option<(&str, usize)> {
    let name_start = start + open_len;
    let close = name_start + text.get(name_start..)?.find(delimiter)?;
    Some((&text[name_start..close], close))
}

fn match_emphasized(text: &str, start: usize) -> Option<RawMatch<'_>> {
    if !text[start..].starts_with("**") {
        return None;
    }

    let (name, close) = delimited_name(text, start, 2, '*')?;
    if !text[close..].starts_with("**") || !has_recognized_extension(name) {
        return None;
    }

    let cursor = close + 2;
    let cursor = cursor + whitespace_run(text, cursor);

    if !text[cursor..].starts_with('[') {
        return match_fenced_block(text, cursor).map(|block| raw_match(start, name, block));
    }

    // The annotation closes at the nearest `]` that still lets a fence follow.
    let mut search_from = cursor + 1;
    while let Some(offset) = text[search_from..].find(']') {
        let after = search_from + offset + 1;
        let fence_at = after + whitespace_run(text, after);
        if let Some(block) = match_fenced_block(text, fence_at) {
            return Some(raw_match(start, name, block));
        }
        search_from = after;
    }

    None
}

fn match_heading(text: &str, start: usize, level: usize) -> Option<RawMatch<'_>> {
    let marker = &"###"[..level];
    if !text[start..].starts_with(marker) {
        return None;
    }

    let spacing_start = start + level;
    let spacing = &text[spacing_start..spacing_start + whitespace_run(text, spacing_start)];
    if spacing.is_empty() {
        return None;
    }

    let title_start = spacing_start + spacing.len();
    let line_end = text[title_start..]
        .find('\n')
        .map_or(text.len(), |offset| title_start + offset);
    let title = text[title_start..line_end].trim_end_matches(is_space);
    if title.is_empty() {
        return None;
    }

    // A bare `.ext` title only qualifies when the marker is followed by more
    // than one blank on the same line, so the leading blank can serve as the
    // path's first character.
    let spacing_has_spare_blank = spacing.chars().count() >= 2 && !spacing.ends_with('\n');
    let qualifies = has_recognized_extension(title)
        || (spacing_has_spare_blank && has_recognized_extension(&format!(" {}", title)));
    if !qualifies {
        return None;
    }

    let title_end = title_start + title.len();
    let fence_at = title_end + whitespace_run(text, title_end);
    if !text[title_end..fence_at].ends_with('\n') {
        return None;
    }

    match_fenced_block(text, fence_at).map(|block| raw_match(start, title, block))
}

fn match_inline_code(text: &str, start: usize) -> Option<RawMatch<'_>> {
    let (name, close) = delimited_name(text, start, 1, '`')?;
    if !has_recognized_extension(name) {
        return None;
    }

    let cursor = close + 1;
    let fence_at = cursor + whitespace_run(text, cursor);
    match_fenced_block(text, fence_at).map(|block| raw_match(start, name, block))
}
