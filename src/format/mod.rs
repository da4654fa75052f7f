//! Turns a loosely structured credibility answer into page markup.
//!
//! The answer usually arrives as numbered sections with bold titles, optional
//! bullet lists, and a "Credibility Score: N/10" phrase somewhere. Nothing here
//! fails: text that does not fit the shape falls back to plain paragraphs.

pub mod render;
pub mod score;
pub mod sections;

use serde::Serialize;

pub use render::{emphasize, escape_html, Section};
pub use score::extract_score;
pub use sections::split_sections;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattingResult {
    pub markup: String,
    pub score: Option<u32>,
}

pub fn format_analysis(raw: &str) -> FormattingResult {
    let score = extract_score(raw);

    let mut markup = String::with_capacity(raw.len() * 2);
    for candidate in split_sections(raw) {
        Section::parse(candidate).render(&mut markup);
    }

    FormattingResult { markup, score }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Here is a structured credibility analysis.

1. **Source Reliability**: The outlet is not named and there is no byline.

2. **Bias Detection**: Strongly *emotional* wording throughout.

3. **Fact-Checking Indicators**:
- No citations
- Statistics given without a source

5. **Red Flags**:
\u{2022} ALL CAPS headline
\u{2022} Appeals to outrage

6. **Overall Credibility Score**: 3/10. The piece reads as **opinion**.";

    #[test]
    fn empty_input_degrades_to_nothing() {
        let result = format_analysis("");
        assert_eq!(result.markup, "");
        assert_eq!(result.score, None);
    }

    #[test]
    fn sections_keep_input_order() {
        let result = format_analysis("1. **A**: x\n2. **B**: y");
        let a = result.markup.find(">A</h3>").expect("section A rendered");
        let b = result.markup.find(">B</h3>").expect("section B rendered");
        assert!(a < b);
        assert_eq!(result.markup.matches(r#"class="analysis-section""#).count(), 2);
    }

    #[test]
    fn full_answer_renders_every_part() {
        let result = format_analysis(SAMPLE);
        assert_eq!(result.score, Some(3));

        let html = &result.markup;
        assert!(html.starts_with(
            r#"<p class="analysis-text">Here is a structured credibility analysis.</p>"#
        ));
        assert_eq!(html.matches(r#"<div class="analysis-section">"#).count(), 5);
        assert!(html.contains(r#"<span class="section-number">6</span>Overall Credibility Score</h3>"#));
        assert!(html.contains("Strongly <em>emotional</em> wording"));
        assert!(html.contains(
            r#"<ul class="analysis-list"><li>No citations</li><li>Statistics given without a source</li></ul>"#
        ));
        assert!(html.contains("<li>ALL CAPS headline</li><li>Appeals to outrage</li>"));
        assert!(html.contains("reads as <strong>opinion</strong>."));
    }

    #[test]
    fn freeform_answer_has_no_title_or_score() {
        let result = format_analysis("Some freeform paragraph with no markers.");
        assert_eq!(
            result.markup,
            r#"<p class="analysis-text">Some freeform paragraph with no markers.</p>"#
        );
        assert_eq!(result.score, None);
    }

    #[test]
    fn markdown_headings_render_as_untitled_blocks() {
        let result = format_analysis("## Verdict\nCredibility Score: 8/10");
        assert_eq!(result.score, Some(8));
        assert!(!result.markup.contains("analysis-section"));
        assert!(result.markup.contains("## Verdict"));
    }

    #[test]
    fn formatting_is_repeatable() {
        assert_eq!(format_analysis(SAMPLE), format_analysis(SAMPLE));
    }
}
