//! Heuristic that tells terminal transcripts apart from real file bodies.
//!
//! Known limitation: the indicators are plain substring checks, so a body
//! that merely contains `cd ` inside a word (`abcd efg`) is inspected too,
//! and short scripts that open with a shebang are dropped. Both outcomes are
//! part of the extraction contract.

/// Substrings that mark a body as a possible shell session.
pub const COMMAND_INDICATORS: &[&str] = &["npm install", "npm create", "cd ", "#!/bin/bash"];

/// Line prefixes that look like shell commands.
pub const SHELL_LINE_PREFIXES: &[&str] = &["#", "npm", "cd", "mkdir"];

const INDICATOR_WINDOW: usize = 100;
const INSPECTED_LINES: usize = 5;

/// Returns true when `body` should be discarded as a terminal transcript.
///
/// Only bodies with a command indicator in their first 100 characters are
/// inspected. Such a body is kept when it has more than five lines and at
/// least one of its first five lines does not look like a shell command.
pub fn is_command_transcript(body: &str) -> bool {
    let window: String = body.chars().take(INDICATOR_WINDOW).collect();
    if !COMMAND_INDICATORS.iter().any(|cmd| window.contains(cmd)) {
        return false;
    }

    let lines: Vec<&str> = body.split('\n').collect();
    let looks_like_file = lines.len() > INSPECTED_LINES
        && !lines
            .iter()
            .take(INSPECTED_LINES)
            .all(|line| looks_like_shell_command(line));

    !looks_like_file
}

fn looks_like_shell_command(line: &str) -> bool {
    SHELL_LINE_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_code_is_kept() {
        assert!(!is_command_transcript("print(\"hi\")"));
        assert!(!is_command_transcript(""));
    }

    #[test]
    fn test_short_install_snippet_is_discarded() {
        assert!(is_command_transcript("npm install express\nnpm start"));
        assert!(is_command_transcript("npm create vite@latest"));
    }

    #[test]
    fn test_long_shebang_script_is_kept() {
        let script = "#!/bin/bash\nset -e\necho \"building\"\ncargo build\necho \"done\"\nls\nexit 0\necho end";
        assert_eq!(script.lines().count(), 8);
        assert!(!is_command_transcript(script));
    }

    #[test]
    fn test_short_shebang_script_is_discarded() {
        assert!(is_command_transcript("#!/bin/bash\necho hi"));
    }

    #[test]
    fn test_long_transcript_of_commands_is_discarded() {
        let transcript = "# setup\nnpm install\ncd app\nmkdir dist\nnpm run build\nnpm start";
        assert!(is_command_transcript(transcript));
    }

    #[test]
    fn test_indicator_outside_window_is_ignored() {
        let body = format!("{}\nnpm install", "x".repeat(120));
        assert!(!is_command_transcript(&body));
    }

    #[test]
    fn test_indicator_inside_a_word_triggers_inspection() {
        assert!(is_command_transcript("abcd efg"));
    }

    #[test]
    fn test_window_counts_characters_not_bytes() {
        let body = format!("{}cd x", "é".repeat(96));
        assert!(is_command_transcript(&body));
    }
}
