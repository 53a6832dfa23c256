//! Field-to-form association

use crate::common::parse;

#[test]
fn test_default_form_is_lazy() {
    let doc = parse("Just prose.");
    assert!(doc.form_declarations.is_empty());

    let doc = parse("@a: [text]\n@b: [text]");
    assert_eq!(doc.form_declarations.len(), 1);
    let default = &doc.form_declarations[0];
    assert_eq!(default.id, "formdown-form-default");
    assert_eq!(default.attributes["action"].to_string(), ".");
    assert_eq!(default.attributes["method"].to_string(), "GET");
}

#[test]
fn test_multi_form_explicit_association() {
    let doc = parse("@form[id=\"a\"]\n@form[id=\"b\"]\n@f1: [text form=\"a\"]\n@f2: [text form=\"b\"]");
    let ids: Vec<_> = doc.form_declarations.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(doc.forms[0].form_id(), Some("a"));
    assert_eq!(doc.forms[1].form_id(), Some("b"));
}

#[test]
fn test_nearest_preceding_form() {
    let doc = parse("@before: [text]\n@form[id=\"one\"]\n@x: [text]\n@form[]\n@y: [text]");
    assert_eq!(doc.forms[0].form_id(), Some("formdown-form-default"));
    assert_eq!(doc.forms[1].form_id(), Some("one"));
    assert_eq!(doc.forms[2].form_id(), Some("formdown-form-1"));
}

#[test]
fn test_forward_reference_falls_back() {
    let doc = parse("@form[id=\"first\"]\n@x: [text form=\"later\"]\n@form[id=\"later\"]");
    assert_eq!(doc.forms[0].form_id(), Some("first"));
}

#[test]
#[tracing_test::traced_test]
fn test_unknown_form_reference_is_logged() {
    let doc = parse("@x: [text form=\"missing\"]");
    assert_eq!(doc.forms[0].form_id(), Some("formdown-form-default"));
    assert!(logs_contain("unknown form"));
}

#[test]
fn test_duplicate_form_ids_keep_first() {
    let doc = parse("@form[id=\"f\" action=\"/1\"]\n@form[id=\"f\" action=\"/2\"]\n@x: [text]");
    assert_eq!(doc.form_declarations.len(), 1);
    assert_eq!(doc.form_declarations[0].attributes["action"].to_string(), "/1");
    assert_eq!(doc.forms[0].form_id(), Some("f"));
}

#[test]
fn test_counters_reset_between_parses() {
    let text = "@form[]\n@x: [text]";
    let first = parse(text);
    let second = parse(text);
    assert_eq!(first, second);
    assert_eq!(second.form_declarations[0].id, "formdown-form-1");
}

#[test]
fn test_every_field_is_bound_to_a_declared_form() {
    let doc = parse("@a: [text]\n@form[id=\"f\"]\nText ___@b[text]\n@c: [text form=\"nope\"]\n## [G]\n@d: [text]");
    for field in &doc.forms {
        let form = field.form_id().expect("field must be bound");
        assert!(doc.form_declarations.iter().any(|f| f.id == form), "{form}");
    }
}
