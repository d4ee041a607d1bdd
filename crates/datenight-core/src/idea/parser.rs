//! Free-text reply parsing.
//!
//! Total by construction: any input yields a usable [`IdeaResponse`].
//! Resolution order:
//! 1. `Title:` / `Description:` markers (case-insensitive), each falling
//!    back independently when only one is present.
//! 2. If neither marker matches: first non-empty line is the title, the
//!    remaining lines joined by spaces are the description.
//! 3. Whole cleaned text, then fixed fallback strings.

use std::sync::LazyLock;

use regex::Regex;

use super::types::IdeaResponse;

/// Title used when the reply offers nothing better.
pub const FALLBACK_TITLE: &str = "Romantic Date Night";

/// Description used when the reply is empty.
pub const FALLBACK_DESCRIPTION: &str = "A special evening together";

// Title capture stops at a newline, an inline `Description:` marker, or the end.
static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Title:\s*(.+?)(?:\n|Description:|$)").expect("title pattern is valid")
});

// Description capture may span lines and stops at a blank line (LF or CRLF,
// possibly holding spaces) or the end.
static DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)Description:\s*(.+?)(?:\r?\n[ \t]*\r?\n|$)")
        .expect("description pattern is valid")
});

/// Parse a provider reply into title, description, and the cleaned text.
pub fn parse_reply(raw: &str) -> IdeaResponse {
    let cleaned = raw.trim();

    let title = capture(&TITLE_RE, cleaned);
    let description = capture(&DESCRIPTION_RE, cleaned);

    let (title, description) = match (title, description) {
        (None, None) => split_lines(cleaned),
        (title, description) => (
            title.unwrap_or_else(|| FALLBACK_TITLE.to_owned()),
            description.unwrap_or_else(|| cleaned.to_owned()),
        ),
    };

    IdeaResponse {
        idea: cleaned.to_owned(),
        title,
        description,
    }
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_owned())
}

fn split_lines(cleaned: &str) -> (String, String) {
    let mut lines = cleaned.lines().map(str::trim).filter(|l| !l.is_empty());

    let title = lines.next().unwrap_or(FALLBACK_TITLE).to_owned();

    let rest = lines.collect::<Vec<_>>().join(" ");
    let description = if !rest.is_empty() {
        rest
    } else if !cleaned.is_empty() {
        cleaned.to_owned()
    } else {
        FALLBACK_DESCRIPTION.to_owned()
    };

    (title, description)
}
