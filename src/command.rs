//! Command parsing
//!
//! Recognizes `<trigger> <command>` and `<trigger> <section> <command>`.
//! Tokens are split on single spaces, so doubled spaces produce empty tokens.

/// A parsed man-page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Explicit section, or `None` to probe all sections
    pub section: Option<String>,
    /// Page name
    pub name: String,
}

/// Result of parsing one chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Ignored,
    Dispatch(Command),
}

/// Parse message content against the trigger token
pub fn parse(content: &str, trigger: &str) -> ParseOutcome {
    let words: Vec<&str> = content.split(' ').collect();

    if words.first() != Some(&trigger) {
        return ParseOutcome::Ignored;
    }

    match words.as_slice() {
        [_, name] => ParseOutcome::Dispatch(Command {
            section: None,
            name: name.to_string(),
        }),
        [_, section, name] => ParseOutcome::Dispatch(Command {
            section: is_section(section).then(|| section.to_string()),
            name: name.to_string(),
        }),
        _ => ParseOutcome::Ignored,
    }
}

/// Sections start with a digit 1-9 and may carry a suffix (`3p`, `1ssl`)
fn is_section(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| matches!(c, '1'..='9'))
}
