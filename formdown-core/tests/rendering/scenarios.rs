//! End-to-end documents, text in and HTML out

use crate::common::{parse, render};
use formdown_core::generate_form_html;

#[test]
fn test_basic_form() {
    let html = render("# Contact\n@name*: []\n@email*: @[]\n@send: [submit]");

    assert!(html.starts_with(
        "<form hidden id=\"formdown-form-default\" action=\".\" method=\"GET\"></form>\n"
    ));
    assert!(html.contains("<h1>Contact</h1>"));
    assert!(html.contains("name=\"name\""));
    assert!(html.contains("<input type=\"email\" id=\"email\" name=\"email\""));
    assert!(html.matches(" required").count() >= 2);
    assert!(html.contains(
        "<button type=\"submit\" id=\"send\" class=\"formdown-button\" form=\"formdown-form-default\">Send</button>"
    ));
}

#[test]
fn test_other_option_select() {
    let html = render("@country{USA,Canada,*}: s[]");

    assert!(html.contains("<option value=\"USA\">USA</option>"));
    assert!(html.contains("<option value=\"\">Other (please specify)</option>"));
    assert!(html.contains("data-formdown-other-for=\"country\""));
    assert!(html.contains("id=\"country_other\""));
    assert!(!html.contains("name=\"country_other\""));
}

#[test]
fn test_inline_field_keeps_surrounding_prose() {
    let html = render("Hello ___@name[text]!");

    assert!(html.contains("<p>Hello <span contenteditable=\"true\" data-field-name=\"name\""));
    assert!(html.contains(">Name</span>!</p>"));
    assert!(!html.contains("formdown-field-container"));
}

#[test]
fn test_multiple_forms() {
    let html = render(
        "@form[id=\"a\" action=\"/a\"]\n@x: [text]\n@form[id=\"b\" action=\"/b\"]\n@y: [text]",
    );

    assert!(html.starts_with(
        "<form hidden id=\"a\" action=\"/a\"></form>\n<form hidden id=\"b\" action=\"/b\"></form>\n"
    ));
    assert!(html.contains("name=\"x\" form=\"a\""));
    assert!(html.contains("name=\"y\" form=\"b\""));
    assert!(!html.contains("formdown-form-default"));
}

#[test]
fn test_value_preselects_option() {
    let html = render("@country{USA,Canada}: s[value=\"Canada\"]");

    assert!(html.contains("<option value=\"USA\">USA</option>"));
    assert!(html.contains("<option value=\"Canada\" selected>Canada</option>"));
}

#[test]
fn test_group_wraps_fields() {
    let html = render("## [Personal]\n@name: [text]\n## Next");

    assert!(html.contains(
        "<fieldset class=\"formdown-group\" data-group=\"formdown-group-personal\">\n<legend>Personal</legend>"
    ));
    assert!(html.contains("</fieldset>\n<h2>Next</h2>"));
}

#[test]
fn test_fields_inside_markdown_structures() {
    let html = render("- Name ___@name[]\n- Age #___@age[]");

    assert!(html.contains("<ul>"));
    assert!(html.contains("data-field-name=\"name\""));
    assert!(html.contains("data-field-type=\"number\""));
}

#[test]
fn test_parsed_and_raw_input_agree() {
    let text = "@form[action=\"/go\"]\n@name*: []\nAge ___@age[number]";
    assert_eq!(generate_form_html(text), generate_form_html(&parse(text)));
}

#[test]
fn test_datalist_prelude() {
    let html = render("@city{Seoul,Tokyo,Lima}: []");

    assert!(html.contains("<datalist id=\"formdown-datalist-1\">\n<option value=\"Seoul\">"));
    assert!(html.contains("list=\"formdown-datalist-1\""));
}

#[test]
fn test_prose_only_document() {
    insta::assert_snapshot!(render("Just *prose*.").trim_end(), @"<p>Just <em>prose</em>.</p>");
}

#[test]
fn test_inline_field_in_heading() {
    let html = render("# Hi ___@who[text]");

    assert!(html.contains("<h1>Hi <span contenteditable=\"true\" data-field-name=\"who\""));
    assert!(!html.contains("___@"));
}

#[test]
fn test_inline_field_in_heading_after_group() {
    let html = render("## [About]\n@a: [text]\n## Name: ___@name[text]");

    assert!(html.contains("</fieldset>"));
    assert!(html.contains("<h2>Name: <span contenteditable=\"true\" data-field-name=\"name\""));
    assert!(!html.contains("___@"));
}

#[test]
fn test_decimal_radio_value_is_checked() {
    let html = render("@r: [radio options=\"1.0,2\" value=1.0]");

    assert!(html.contains("value=\"1.0\" form=\"formdown-form-default\" checked>"));
    assert!(!html.contains("value=\"2\" form=\"formdown-form-default\" checked>"));
}

#[test]
fn test_zero_padded_select_value_is_selected() {
    let html = render("@code: [select options=\"007,7\" value=007]");

    assert!(html.contains("<option value=\"007\" selected>007</option>"));
    assert!(html.contains("<option value=\"7\">7</option>"));
}
