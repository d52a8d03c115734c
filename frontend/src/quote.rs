//! Turning a post's raw text into a block quote appended to the reply draft.

pub const QUOTE_PREFIX: &str = "> ";
pub const DRAFT_SEPARATOR: &str = "\n\n";

/// Prefixes every line of `text` with `"> "`.
///
/// Lines are split on `\n` only, so a trailing newline yields a trailing
/// `"> "` line and the line count is always preserved.
pub fn quote_lines(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("{}{}", QUOTE_PREFIX, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The reply draft after appending `quoted` to whatever was already typed.
pub fn compose_draft(previous: &str, quoted: &str) -> String {
    let previous = previous.trim();
    let padding = if previous.is_empty() {
        ""
    } else {
        DRAFT_SEPARATOR
    };

    format!("{}{}{}{}", previous, padding, quoted, DRAFT_SEPARATOR)
}
