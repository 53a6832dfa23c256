//! Shared helpers for the integration tests

use formdown_core::{generate_form_html, parse_formdown, Field, ParsedDocument};

pub fn parse(text: &str) -> ParsedDocument {
    parse_formdown(text)
}

pub fn render(text: &str) -> String {
    generate_form_html(text)
}

/// The single field of a one-field document.
pub fn only_field(text: &str) -> Field {
    let mut doc = parse(text);
    assert_eq!(doc.forms.len(), 1, "expected exactly one field in {text:?}");
    doc.forms.remove(0)
}
