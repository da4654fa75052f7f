use std::sync::LazyLock;

use regex::Regex;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+\.\s+\*\*|#{1,3}\s)").expect("heading pattern is valid")
});

/// Splits raw analysis text into section candidates.
///
/// A new candidate starts at every line (after the first) that opens with a
/// numbered bold heading (`3. **`) or a markdown heading (`#`, `##`, `###`).
/// Text before the first heading is its own candidate. Blank candidates are
/// dropped; malformed headings just stay inside the surrounding candidate.
pub fn split_sections(raw: &str) -> Vec<&str> {
    let mut candidates = Vec::new();
    let mut start = 0;
    let mut offset = 0;

    for line in raw.split_inclusive('\n') {
        if offset > 0 && is_heading_line(line) {
            // the separating newline belongs to neither side
            let end = offset - 1;
            candidates.push(&raw[start..end]);
            start = offset;
        }
        offset += line.len();
    }
    candidates.push(&raw[start..]);

    candidates
        .into_iter()
        .filter(|candidate| !candidate.trim().is_empty())
        .collect()
}

fn is_heading_line(line: &str) -> bool {
    HEADING_RE.is_match(line)
}
