// src/page/html.rs
// =============================================================================
// This module pulls raw references out of an HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Never fails on broken markup (html5ever recovers like a browser does)
//
// What counts as a reference, in this order:
// 1. href of every <a> element
// 2. href of every <link> element (stylesheets, icons, feeds, ...)
// 3. src of every <script> element
//
// References are returned exactly as written in the markup. Nothing is
// resolved, normalized, or deduplicated here; that happens later, globally.
//
// Rust concepts:
// - Option<String>: An <a> or <link> without href still yields an entry,
//   it's just None
// - Iterators: chain() glues the three element kinds into one sequence
// =============================================================================

use scraper::{ElementRef, Html, Selector};

// One entry per <a>/<link> element (None when href is missing) plus one per
// <script> element that has a src.
pub type Reference = Option<String>;

// Extracts every candidate reference from a page body
//
// Parameters:
//   body: the page content (assumed to be HTML)
//
// Returns: Vec of references in document order, anchors first, then links,
// then scripts. Duplicates within the page are kept.
//
// Example:
//   body = "<a href='/a'></a><a>no href</a><script src='x.js'></script>"
//   result = [Some("/a"), None, Some("x.js")]
pub fn extract_references(body: &str) -> Vec<Reference> {
    let document = Html::parse_document(body);

    // These selectors are constants, parsing them cannot fail
    let anchors = Selector::parse("a").unwrap();
    let links = Selector::parse("link").unwrap();
    let scripts = Selector::parse("script").unwrap();

    let anchor_refs = document.select(&anchors).map(|el| attr(el, "href"));
    let link_refs = document.select(&links).map(|el| attr(el, "href"));

    // Scripts without src are inline scripts, they are skipped entirely
    let script_refs = document
        .select(&scripts)
        .filter_map(|el| attr(el, "src"))
        .map(Some);

    anchor_refs.chain(link_refs).chain(script_refs).collect()
}

fn attr(element: ElementRef<'_>, name: &str) -> Option<String> {
    element.value().attr(name).map(str::to_string)
}
