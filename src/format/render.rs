use std::sync::LazyLock;

use regex::Regex;

pub const BULLET: char = '\u{2022}';

static NUMBERED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A(\d+)\.\s+\*\*(.+?)\*\*:?\s*(.*)").expect("numbered pattern is valid")
});
static STRONG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("strong pattern is valid"));
static EM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("em pattern is valid"));
static DASH_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*-\s+").expect("dash item pattern is valid"));

/// One logical unit of an analysis answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub number: Option<&'a str>,
    pub title: Option<&'a str>,
    pub body: &'a str,
}

impl<'a> Section<'a> {
    /// Reads a `N. **Title**: body` heading off the front of a candidate.
    /// Anything else is an untitled body.
    pub fn parse(candidate: &'a str) -> Self {
        match NUMBERED_RE.captures(candidate) {
            Some(caps) => {
                let text = |i: usize| caps.get(i).map_or("", |m| m.as_str());
                Self {
                    number: Some(text(1)),
                    title: Some(text(2)),
                    body: text(3),
                }
            }
            None => Self {
                number: None,
                title: None,
                body: candidate,
            },
        }
    }

    pub fn render(&self, out: &mut String) {
        match (self.number, self.title) {
            (Some(number), Some(title)) => {
                out.push_str(r#"<div class="analysis-section">"#);
                out.push_str(r#"<h3 class="section-title"><span class="section-number">"#);
                out.push_str(number);
                out.push_str("</span>");
                out.push_str(&escape_html(title));
                out.push_str("</h3>");
                render_body(self.body, out);
                out.push_str("</div>");
            }
            _ => render_body(self.body, out),
        }
    }
}

/// Converts `**x**` to strong and then `*x*` to em. The order matters: run
/// the other way round, a bold pair reads as two empty italics.
pub fn emphasize(text: &str) -> String {
    let strong = STRONG_RE.replace_all(text, "<strong>${1}</strong>");
    EM_RE.replace_all(&strong, "<em>${1}</em>").into_owned()
}

pub fn escape_html(text: &str) -> String {
    askama_escape::escape(text, askama_escape::Html).to_string()
}

/// Heuristic: a bullet glyph anywhere, or any `- ` line, switches the whole
/// body to line-by-line list rendering. Prose that happens to contain a
/// dash line gets listed too.
fn has_bullets(body: &str) -> bool {
    body.contains(BULLET) || DASH_ITEM_RE.is_match(body)
}

fn render_body(body: &str, out: &mut String) {
    let body = emphasize(&escape_html(body.trim()));
    if body.is_empty() {
        return;
    }

    if has_bullets(&body) {
        render_lines(&body, out);
    } else {
        for paragraph in body.split("\n\n").map(str::trim) {
            if !paragraph.is_empty() {
                push_paragraph(paragraph, out);
            }
        }
    }
}

fn render_lines(body: &str, out: &mut String) {
    let mut in_list = false;

    for line in body.split('\n').map(str::trim) {
        // blank lines never close a list, only the next non-bullet line does
        if line.is_empty() {
            continue;
        }

        if line.starts_with(BULLET) || line.starts_with('-') {
            if !in_list {
                out.push_str(r#"<ul class="analysis-list">"#);
                in_list = true;
            }
            let item = line.trim_start_matches([BULLET, '-', ' ']).trim();
            if !item.is_empty() {
                out.push_str("<li>");
                out.push_str(item);
                out.push_str("</li>");
            }
        } else {
            if in_list {
                out.push_str("</ul>");
                in_list = false;
            }
            push_paragraph(line, out);
        }
    }

    if in_list {
        out.push_str("</ul>");
    }
}

fn push_paragraph(text: &str, out: &mut String) {
    out.push_str(r#"<p class="analysis-text">"#);
    out.push_str(text);
    out.push_str("</p>");
}
