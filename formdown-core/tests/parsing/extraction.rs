//! Line classification and placeholder extraction

use crate::common::{only_field, parse};
use formdown_core::{parse as legacy_parse, AttributeValue, FormdownError};

#[test]
fn test_empty_document() {
    let doc = parse("");
    assert_eq!(doc.markdown, "");
    assert!(doc.forms.is_empty());
    assert!(doc.form_declarations.is_empty());
    assert!(doc.datalist_declarations.is_empty());
    assert!(doc.group_declarations.is_empty());
}

#[test]
fn test_plain_markdown_passes_through() {
    let text = "# Title\n\nSome *prose* with a [link](https://example.com).\n\n- a\n- b";
    let doc = parse(text);
    assert_eq!(doc.markdown, text);
    assert!(doc.forms.is_empty());
}

#[test]
fn test_mentions_and_emails_are_not_fields() {
    let text = "Ping @alice or mail bob@example.com.\n![img](a@b.png)";
    let doc = parse(text);
    assert!(doc.forms.is_empty());
    assert_eq!(doc.markdown, text);
}

#[test]
fn test_block_field_placeholders_use_global_index() {
    let doc = parse("@a: [text]\nText ___@b[text] here\n@c: [text]");
    assert_eq!(doc.forms.len(), 3);
    let lines: Vec<_> = doc.markdown.lines().collect();
    assert_eq!(lines[0], "<!--FORMDOWN_FIELD_0-->");
    assert!(lines[1].contains("data-formdown-inline=\"1\""));
    assert_eq!(lines[2], "<!--FORMDOWN_FIELD_2-->");
}

#[test]
fn test_standard_label() {
    let field = only_field("@full_name(Your full name): [text required]");
    assert_eq!(field.name(), "full_name");
    assert_eq!(field.label, "Your full name");
    assert!(field.required);
}

#[test]
fn test_smart_label_when_no_label_given() {
    assert_eq!(only_field("@dateOfBirth: [date]").label, "Date Of Birth");
    assert_eq!(only_field("@zip_code: [text]").label, "Zip Code");
}

#[test]
fn test_attributes_keep_source_order() {
    let field = only_field("@age: [number min=18 max=120 step=1 data-unit=\"years\"]");
    let keys: Vec<_> = field.attributes.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["min", "max", "step", "data-unit", "form"]);
    assert_eq!(field.attributes["min"], AttributeValue::Integer(18));
}

#[test]
fn test_field_with_no_attributes() {
    let field = only_field("@note: []");
    assert_eq!(field.field_type, "text");
    assert_eq!(field.attributes.len(), 1);
}

#[test]
fn test_select_options_and_value() {
    let field = only_field("@country: [select value=\"Canada\" options=\"USA, Canada ,UK\"]");
    assert_eq!(field.field_type, "select");
    assert_eq!(
        field.options,
        Some(vec!["USA".to_string(), "Canada".to_string(), "UK".to_string()])
    );
    assert_eq!(field.value, Some(AttributeValue::from("Canada")));
}

#[test]
fn test_inline_fields_in_table_cells() {
    let doc = parse("| Item | Qty |\n|---|---|\n| Apples | ___@apples[number] |\n| Pears | #___@pears[] |");
    assert_eq!(doc.forms.len(), 2);
    assert_eq!(doc.forms[1].field_type, "number");
    assert!(doc.markdown.starts_with("| Item | Qty |\n|---|---|\n| Apples | <span"));
}

#[test]
fn test_inline_placeholder_carries_metadata() {
    let doc = parse("Name: ___@name[text required placeholder=\"Jane\"]");
    assert_eq!(
        doc.markdown,
        "Name: <span data-formdown-inline=\"0\" data-field-name=\"name\" data-field-type=\"text\" data-placeholder=\"Jane\" data-required=\"true\"></span>"
    );
}

#[test]
fn test_datalist_declarations() {
    let doc = parse("@datalist[id=\"cities\" options=\"Seoul,Tokyo\"]\n@#fruits: apple, pear\n@city: [text list=cities]");
    assert_eq!(doc.datalist_declarations.len(), 2);
    assert_eq!(doc.datalist_declarations[0].id, "cities");
    assert_eq!(doc.datalist_declarations[1].options, vec!["apple", "pear"]);
    assert_eq!(doc.markdown, "\n\n<!--FORMDOWN_FIELD_0-->");
}

#[test]
fn test_invalid_datalists_are_dropped_but_removed() {
    let doc = parse("@datalist[id=\"\" options=\"a\"]\n@#nothing:\ntext");
    assert!(doc.datalist_declarations.is_empty());
    assert_eq!(doc.markdown, "\n\ntext");
}

#[test]
fn test_duplicate_datalist_keeps_first() {
    let doc = parse("@#x: a\n@#x: b");
    assert_eq!(doc.datalist_declarations.len(), 1);
    assert_eq!(doc.datalist_declarations[0].options, vec!["a"]);
}

#[test]
fn test_groups() {
    let doc = parse(
        "## [Personal]\n@name: [text]\n## [Work collapsible]\n@company: [text]\n## Done\n@extra: [text]",
    );
    let ids: Vec<_> = doc.group_declarations.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec!["formdown-group-personal", "formdown-group-work"]);
    assert!(doc.group_declarations[1].collapsible);
    assert_eq!(doc.forms[0].group.as_deref(), Some("formdown-group-personal"));
    assert_eq!(doc.forms[1].group.as_deref(), Some("formdown-group-work"));
    assert_eq!(doc.forms[2].group, None);
}

#[test]
fn test_subheadings_keep_group_open() {
    let doc = parse("## [Address]\n### Street\n@street: [text]");
    assert_eq!(doc.forms[0].group.as_deref(), Some("formdown-group-address"));
}

#[test]
fn test_invalid_field_names_are_skipped() {
    let doc = parse("@1st: [text]\n@ok: [text]\nInline ___@2nd[text] here");
    let names: Vec<_> = doc.forms.iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["ok"]);
    assert!(doc.markdown.ends_with("Inline  here"));
}

#[test]
fn test_legacy_parse_is_strict() {
    let err = legacy_parse("@ok: [text]\n@9lives: [text]").unwrap_err();
    assert_eq!(err, FormdownError::InvalidFieldName("9lives".to_string()));
    assert_eq!(err.to_string(), "Invalid field name '9lives'");
}

#[test]
fn test_legacy_parse_returns_fields_and_errors() {
    let result = legacy_parse("@a: [text]\n@b: [text form=ghost]").unwrap();
    assert_eq!(result.fields.len(), 2);
    assert_eq!(result.errors, vec!["line 2: field 'b' references unknown form 'ghost'"]);
}

#[test]
fn test_parsed_document_json_shape() {
    let doc = parse("@form[id=\"f\"]\n@name*: []");
    let json = serde_json::to_value(&doc).unwrap();
    assert!(json.get("formDeclarations").is_some());
    assert!(json.get("datalistDeclarations").is_some());
    assert!(json.get("groupDeclarations").is_some());
    assert_eq!(json["forms"][0]["type"], "text");
    assert_eq!(json["forms"][0]["required"], true);
    assert_eq!(json["forms"][0]["attributes"]["form"], "f");
}

#[test]
fn test_inline_field_in_heading() {
    let text = "## Your name: ___@name[text required]";
    let field = only_field(text);
    let doc = parse(text);

    assert!(field.inline);
    assert!(field.required);
    assert!(doc
        .markdown
        .starts_with("## Your name: <span data-formdown-inline=\"0\""));
}

#[test]
fn test_inline_field_in_heading_closes_group() {
    let doc = parse("## [Contact]\n@a: [text]\n# Done ___@b[text]");

    assert_eq!(doc.forms.len(), 2);
    assert!(doc.forms[1].group.is_none());
    assert!(doc
        .markdown
        .contains("<!--FORMDOWN_GROUP_END_0-->\n# Done <span data-formdown-inline=\"1\""));
}

#[test]
fn test_numeric_value_keeps_written_form() {
    let doc = parse("@a: [radio options=\"1.0,2\" value=1.0]\n@b: [number value=5]");

    assert_eq!(doc.forms[0].value, Some(AttributeValue::String("1.0".into())));
    assert_eq!(doc.forms[1].value, Some(AttributeValue::Integer(5)));
}
