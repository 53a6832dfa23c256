//! Author text is always escaped

use crate::common::render;

#[test]
fn test_attribute_values_are_escaped() {
    let html = render("@x: [text placeholder=\"<script>alert(1)</script>\"]");
    assert!(html.contains("placeholder=\"&lt;script&gt;alert(1)&lt;/script&gt;\""));
    assert!(!html.contains("<script"));
}

#[test]
fn test_labels_and_options_are_escaped() {
    let html = render("@pick: [select label=\"A & B\" options=\"<i>,x\"]");
    assert!(html.contains(">A &amp; B</label>"));
    assert!(html.contains("<option value=\"&lt;i&gt;\">&lt;i&gt;</option>"));
}

#[test]
fn test_form_attributes_are_escaped() {
    let html = render("@form[id=\"f\" action=\"/x?a=1&b=2\"]\n@y: [text]");
    assert!(html.contains("action=\"/x?a=1&amp;b=2\""));
}

#[test]
#[tracing_test::traced_test]
fn test_event_handlers_are_dropped() {
    let html = render("@x: [text onclick=\"alert(1)\" onfocus=\"x()\"]");
    assert!(!html.contains("onclick"));
    assert!(!html.contains("onfocus"));
    assert!(logs_contain("event handler attributes are not emitted"));
}
