//! Free-text sanitisation
//!
//! Defence-in-depth only: downstream rendering must still escape output.

/// Sanitise a free-text field from an untrusted submission.
///
/// Strips `<`/`>` outright, then restricts the remainder to
/// `[A-Za-z0-9 .@'-]` and trims surrounding whitespace.
#[must_use]
pub fn sanitize_text(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '.' | '@' | '\'' | '-'))
        .collect();

    cleaned.trim().to_string()
}
