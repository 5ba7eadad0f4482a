//! Branch/leaf classification
//!
//! A single structural marker decides the shape of every page: documents
//! carrying a `codes-listing` element are branches exposing an ordered
//! list of child links; everything else is a leaf with extractable
//! content. Parsing happens synchronously and returns owned data only.

use scraper::{Html, Selector};

/// CSS class of the child-listing container on branch pages.
pub const LISTING_MARKER: &str = "codes-listing";

/// One child link of a branch, in discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildLink {
    pub text: String,
    pub href: String,
}

/// What kind of node a fetched document is.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentKind {
    /// The page lists further documents; children are in listing order.
    Branch(Vec<ChildLink>),

    /// Terminal document with extractable content.
    Leaf,
}

/// Classifies a fetched document by the listing marker.
pub fn classify_document(body: &str) -> DocumentKind {
    let document = Html::parse_document(body);

    let listing_selector = match Selector::parse(&format!(".{}", LISTING_MARKER)) {
        Ok(selector) => selector,
        Err(_) => return DocumentKind::Leaf,
    };

    let listing = match document.select(&listing_selector).next() {
        Some(element) => element,
        None => return DocumentKind::Leaf,
    };

    let mut children = Vec::new();
    if let Ok(link_selector) = Selector::parse("a[href]") {
        for a in listing.select(&link_selector) {
            if let Some(href) = a.value().attr("href") {
                children.push(ChildLink {
                    text: a.text().collect::<String>().trim().to_string(),
                    href: href.to_string(),
                });
            }
        }
    }
    DocumentKind::Branch(children)
}
