use std::sync::LazyLock;

use regex::Regex;

static SCORE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Overall Credibility Score|Credibility Score).*?([0-9]+)/10")
        .expect("score pattern is valid")
});

/// Finds the first "Credibility Score ... N/10" phrase and returns `N`.
///
/// Only ASCII digits count. The value is not clamped: a malformed answer
/// reporting `15/10` yields 15.
pub fn extract_score(raw: &str) -> Option<u32> {
    let captures = SCORE_RE.captures(raw)?;
    captures.get(1)?.as_str().parse().ok()
}
