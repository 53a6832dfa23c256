//! Shorthand dialect expansion

use crate::common::{only_field, parse};
use formdown_core::AttributeValue;

#[test]
fn test_required_marker_equals_standard_required() {
    let mut short = only_field("@name*: []");
    let mut long = only_field("@name: [text required]");
    short.attributes.shift_remove("form");
    long.attributes.shift_remove("form");
    assert_eq!(short, long);
}

#[test]
fn test_label_order_is_irrelevant() {
    let a = only_field("@size*{S,M,L}(T-Shirt Size): r[]");
    let b = only_field("@size(T-Shirt Size)*{S,M,L}: r[]");
    assert_eq!(a, b);
    assert_eq!(a.label, "T-Shirt Size");
    assert!(a.required);
}

#[test]
fn test_label_alone_is_standard_syntax() {
    let field = only_field("@bio(About you): [textarea rows=4]");
    assert_eq!(field.field_type, "textarea");
    assert_eq!(field.attributes["rows"], AttributeValue::Integer(4));
}

#[test]
fn test_type_markers() {
    let cases = [
        ("@f: @[]", "email"),
        ("@f: #[]", "number"),
        ("@f: %[]", "tel"),
        ("@f: &[]", "url"),
        ("@f: d[]", "date"),
        ("@f: t[]", "time"),
        ("@f: dt[]", "datetime-local"),
        ("@f: ?[]", "password"),
        ("@f: T[]", "textarea"),
        ("@f: r[]", "radio"),
        ("@f: s[]", "select"),
        ("@f: c[]", "checkbox"),
        ("@f: R[]", "range"),
        ("@f: F[]", "file"),
        ("@f: C[]", "color"),
        ("@f: M[]", "month"),
        ("@f: W[]", "week"),
    ];
    for (line, expected) in cases {
        assert_eq!(only_field(line).field_type, expected, "{line}");
    }
}

#[test]
fn test_textarea_rows_marker() {
    let field = only_field("@story: T8[placeholder=\"Once upon a time\"]");
    assert_eq!(field.field_type, "textarea");
    assert_eq!(field.attributes["rows"], AttributeValue::Integer(8));
    assert_eq!(field.placeholder.as_deref(), Some("Once upon a time"));
}

#[test]
fn test_other_option_select() {
    let field = only_field("@country{USA,Canada,*}: s[]");
    assert_eq!(
        field.options,
        Some(vec!["USA".to_string(), "Canada".to_string()])
    );
    assert!(field.allow_other);
    assert_eq!(field.other_label, None);
}

#[test]
fn test_other_option_label_from_first_entry() {
    let field = only_field("@source{Web,*(Somewhere else),Radio,*(Ignored)}: r[]");
    assert_eq!(
        field.options,
        Some(vec!["Web".to_string(), "Radio".to_string()])
    );
    assert_eq!(field.other_label.as_deref(), Some("Somewhere else"));
}

#[test]
fn test_date_content_is_format() {
    let field = only_field("@start{YYYY-MM-DD}: d[]");
    assert_eq!(field.format.as_deref(), Some("YYYY-MM-DD"));
    assert!(field.pattern.is_none());
}

#[test]
fn test_mask_and_glob_patterns() {
    assert_eq!(
        only_field("@phone{###-###-####}: %[]").pattern.as_deref(),
        Some(r"^\d{3}\-\d{3}\-\d{4}$")
    );
    assert_eq!(
        only_field("@code{AB-##}: []").pattern.as_deref(),
        Some(r"^AB\-\d{2}$")
    );
    assert_eq!(
        only_field("@doc{*.pdf}: []").pattern.as_deref(),
        Some(r"^.*\.pdf$")
    );
}

#[test]
fn test_literal_regex_content() {
    assert_eq!(
        only_field(r"@zip{^\d{5}(-\d{4})?$}: []").pattern.as_deref(),
        Some(r"^\d{5}(-\d{4})?$")
    );
    assert_eq!(
        only_field("@user{[a-z]+}: []").pattern.as_deref(),
        Some("[a-z]+")
    );
}

#[test]
fn test_inline_shorthand() {
    let doc = parse("Email @___@email*[] or call %___@phone{###-####}[]");
    assert_eq!(doc.forms.len(), 2);
    assert_eq!(doc.forms[0].field_type, "email");
    assert!(doc.forms[0].required);
    assert!(doc.forms[0].inline);
    assert_eq!(doc.forms[1].field_type, "tel");
    assert_eq!(doc.forms[1].pattern.as_deref(), Some(r"^\d{3}\-\d{4}$"));
    assert!(doc.markdown.starts_with("Email <span"));
    assert!(doc.markdown.contains("</span> or call <span"));
}

#[test]
fn test_inline_standard_with_label() {
    let doc = parse("I am ___@age(Your age)[number min=0] years old.");
    let field = &doc.forms[0];
    assert_eq!(field.label, "Your age");
    assert_eq!(field.field_type, "number");
    assert!(doc.markdown.ends_with("></span> years old."));
}

#[test]
fn test_conditions_survive_parsing() {
    let field = only_field(r#"@spouse: [text visible-if="status == married"]"#);
    let condition = field.conditions.unwrap().visible_if.unwrap();
    assert_eq!(condition.field, "status");
    assert_eq!(condition.value.as_deref(), Some("married"));
}

#[test]
fn test_label_may_contain_parentheses() {
    let field = only_field("@phone(Phone (mobile)): [tel]");
    assert_eq!(field.label, "Phone (mobile)");
    assert_eq!(field.field_type, "tel");

    let field = only_field("Call ___@phone(Phone (mobile))[tel] today");
    assert_eq!(field.label, "Phone (mobile)");
    assert!(field.inline);
}
