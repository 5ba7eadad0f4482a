//! Leaf field extraction
//!
//! Turns a fetched leaf document into record fields. The required
//! structural markers are the breadcrumb trail and the content container;
//! if either is missing the extraction fails and the URL is treated like
//! a failed fetch. Citation markup differs slightly between the codes and
//! regulations sites, which is the only place the dataset kind matters
//! during a walk.

use crate::config::DatasetKind;
use scraper::{ElementRef, Html, Selector};

/// The breadcrumb separator the site uses, U+203A.
const BREADCRUMB_SEP: char = '\u{203a}';

/// Fields extracted from one leaf document.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafFields {
    /// Breadcrumb trail text.
    pub breadcrumb: String,
    /// Heading fragments joined with the breadcrumb separator.
    pub title: String,
    /// Whether a "Universal Citation:" marker is present.
    pub univ_cite: bool,
    pub citation: Option<String>,
    /// Body text, one line per text node.
    pub content: String,
}

/// Extracts record fields from a leaf document.
///
/// Fails with a reason string when a required marker is absent; the
/// caller reports that as a fetch-equivalent failure for this URL.
pub fn extract_leaf(body: &str, dataset: DatasetKind) -> Result<LeafFields, String> {
    let document = Html::parse_document(body);

    let sep = select_text(&document, "span.breadcrumb-sep")
        .ok_or_else(|| "breadcrumb separator missing".to_string())?;
    if sep.chars().next() != Some(BREADCRUMB_SEP) {
        return Err(format!("unexpected breadcrumb separator {:?}", sep));
    }

    let breadcrumb = select_element(&document, "nav.breadcrumbs")
        .map(concat_text)
        .ok_or_else(|| "breadcrumb trail missing".to_string())?;

    let title = select_element(&document, "h1")
        .map(|h1| joined_text(h1, &format!(" {} ", BREADCRUMB_SEP)))
        .ok_or_else(|| "title heading missing".to_string())?;

    let content = select_element(&document, "#codes-content")
        .map(|el| joined_text(el, "\n"))
        .ok_or_else(|| "content container missing".to_string())?;

    let (univ_cite, citation) = match dataset {
        DatasetKind::Codes => {
            let univ_cite = select_text(&document, "div.citation-wrapper strong")
                .map(|s| s == "Universal Citation:")
                .unwrap_or(false);
            let citation = select_text(&document, "div.citation span");
            (univ_cite, citation)
        }
        DatasetKind::Regulations => {
            let univ_cite = select_text(&document, "div.has-margin-bottom-20 b")
                .map(|s| s == "Universal Citation:")
                .unwrap_or(false);
            let citation = select_text(&document, r#"a[href="/citations.html"]"#);
            (univ_cite, citation)
        }
    };

    Ok(LeafFields {
        breadcrumb,
        title,
        univ_cite,
        citation,
        content,
    })
}

fn select_element<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

/// Trimmed text of the first element matching `css`, if any.
fn select_text(document: &Html, css: &str) -> Option<String> {
    select_element(document, css)
        .map(concat_text)
        .filter(|s| !s.is_empty())
}

/// All text fragments of an element, each trimmed, concatenated.
fn concat_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect::<String>()
}

/// All non-empty text fragments of an element, trimmed, joined with `sep`.
fn joined_text(element: ElementRef<'_>, sep: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_leaf_html() -> String {
        r#"<html><body>
            <nav class="breadcrumbs">
                Texas Codes <span class="breadcrumb-sep">›</span> Title 1
                <span class="breadcrumb-sep">›</span> Section 1.01
            </nav>
            <h1> Section 1.01 <span>General Provisions</span> </h1>
            <div class="citation-wrapper"><strong>Universal Citation:</strong></div>
            <div class="citation"><span>Tex. Code § 1.01 (2023)</span></div>
            <div id="codes-content">
                <p>First paragraph.</p>
                <p>Second paragraph.</p>
            </div>
        </body></html>"#
            .to_string()
    }

    #[test]
    fn test_extracts_code_leaf_fields() {
        let fields = extract_leaf(&code_leaf_html(), DatasetKind::Codes).unwrap();

        assert_eq!(fields.title, "Section 1.01 › General Provisions");
        assert!(fields.breadcrumb.contains("Texas Codes"));
        assert!(fields.univ_cite);
        assert_eq!(fields.citation.as_deref(), Some("Tex. Code § 1.01 (2023)"));
        assert_eq!(fields.content, "First paragraph.\nSecond paragraph.");
    }

    #[test]
    fn test_extracts_regulation_leaf_fields() {
        let html = r#"<html><body>
            <nav class="breadcrumbs">Vermont Regs <span class="breadcrumb-sep">›</span> Rule 1</nav>
            <h1>Rule 1</h1>
            <div class="has-margin-bottom-20"><b>Universal Citation:</b></div>
            <a href="/citations.html">Vt. Admin. Code 1-1</a>
            <div id="codes-content">Rule text.</div>
        </body></html>"#;

        let fields = extract_leaf(html, DatasetKind::Regulations).unwrap();
        assert!(fields.univ_cite);
        assert_eq!(fields.citation.as_deref(), Some("Vt. Admin. Code 1-1"));
        assert_eq!(fields.content, "Rule text.");
    }

    #[test]
    fn test_citation_markers_are_optional() {
        let html = r#"<html><body>
            <nav class="breadcrumbs">X <span class="breadcrumb-sep">›</span> Y</nav>
            <h1>Y</h1>
            <div id="codes-content">Text.</div>
        </body></html>"#;

        let fields = extract_leaf(html, DatasetKind::Codes).unwrap();
        assert!(!fields.univ_cite);
        assert_eq!(fields.citation, None);
    }

    #[test]
    fn test_missing_breadcrumb_separator_fails() {
        let html = r#"<html><body>
            <nav class="breadcrumbs">X</nav>
            <h1>Y</h1>
            <div id="codes-content">Text.</div>
        </body></html>"#;

        let err = extract_leaf(html, DatasetKind::Codes).unwrap_err();
        assert!(err.contains("separator"));
    }

    #[test]
    fn test_wrong_separator_character_fails() {
        let html = r#"<html><body>
            <nav class="breadcrumbs">X <span class="breadcrumb-sep">&gt;</span> Y</nav>
            <h1>Y</h1>
            <div id="codes-content">Text.</div>
        </body></html>"#;

        let err = extract_leaf(html, DatasetKind::Codes).unwrap_err();
        assert!(err.contains("unexpected breadcrumb separator"));
    }

    #[test]
    fn test_missing_content_container_fails() {
        let html = r#"<html><body>
            <nav class="breadcrumbs">X <span class="breadcrumb-sep">›</span> Y</nav>
            <h1>Y</h1>
        </body></html>"#;

        let err = extract_leaf(html, DatasetKind::Codes).unwrap_err();
        assert!(err.contains("content container"));
    }

    #[test]
    fn test_regulation_selectors_do_not_match_code_markup() {
        // Code-style citation markup on a regulations crawl is ignored
        let fields = extract_leaf(&code_leaf_html(), DatasetKind::Regulations).unwrap();
        assert!(!fields.univ_cite);
        assert_eq!(fields.citation, None);
    }
}
