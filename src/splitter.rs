//! Content splitting and pagination
//!
//! A fetched body is a sequence of chunks separated by a delimiter. Each
//! chunk is a title line followed by its description. Descriptions longer
//! than the card cap are sliced into several segments sharing the title.

use tracing::debug;

/// Discord embed title limit
pub const TITLE_LIMIT: usize = 256;

/// One card's worth of content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub title: String,
    pub description: String,
}

/// Split a body into ordered segments, each description at most `cap` chars.
///
/// Chunks without a newline are malformed and skipped; this includes the
/// empty chunk after a trailing delimiter.
pub fn split(body: &str, delimiter: &str, cap: usize) -> Vec<Segment> {
    let cap = cap.max(1);
    let mut segments = Vec::new();

    for (index, chunk) in body.split(delimiter).enumerate() {
        let Some((title, description)) = chunk.split_once('\n') else {
            if !chunk.trim().is_empty() {
                debug!("Skipping chunk {} without a title line", index);
            }
            continue;
        };

        let title = truncate_chars(title, TITLE_LIMIT);
        for page in paginate(description, cap) {
            segments.push(Segment {
                title: title.to_string(),
                description: page.to_string(),
            });
        }
    }

    segments
}

/// Slice `text` into pieces of at most `cap` chars, cut on char boundaries.
/// An empty text yields one empty piece.
pub fn paginate(text: &str, cap: usize) -> Vec<&str> {
    let mut pages = Vec::new();
    let mut remaining = text;

    // Walks at most `cap + 1` chars per page, so the whole pass is linear.
    while let Some((split_at, _)) = remaining.char_indices().nth(cap) {
        let (page, rest) = remaining.split_at(split_at);
        pages.push(page);
        remaining = rest;
    }
    pages.push(remaining);

    pages
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}
