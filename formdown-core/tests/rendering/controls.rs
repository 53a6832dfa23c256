//! Built-in control markup

use crate::common::render;

#[test]
fn test_text_input_snapshot() {
    let html = render("@form[id=\"f\"]\n@nick: [text placeholder=\"Nick\" maxlength=20]");
    let input = html
        .lines()
        .find(|line| line.starts_with("<input"))
        .unwrap_or_default();
    insta::assert_snapshot!(input, @r#"<input type="text" id="nick" name="nick" form="f" placeholder="Nick" maxlength="20">"#);
}

#[test]
fn test_label_and_required_marker() {
    let html = render("@name*(Full Name): []");
    assert!(html.contains(
        "<label for=\"name\">Full Name<span class=\"required\" aria-label=\"required\">*</span></label>"
    ));
}

#[test]
fn test_textarea_rows() {
    let html = render("@bio: T4[placeholder=\"About\"]");
    assert!(html.contains(
        "<textarea id=\"bio\" name=\"bio\" form=\"formdown-form-default\" placeholder=\"About\" rows=\"4\"></textarea>"
    ));
}

#[test]
fn test_radio_group() {
    let html = render("@size{S,M}: r[required value=M]");
    assert!(html.contains("<fieldset class=\"formdown-radio-group\" id=\"size_group\">"));
    assert!(html.contains(
        "<input type=\"radio\" id=\"size_0\" name=\"size\" value=\"S\" form=\"formdown-form-default\" required>"
    ));
    assert!(html.contains(
        "<input type=\"radio\" id=\"size_1\" name=\"size\" value=\"M\" form=\"formdown-form-default\" checked>"
    ));
}

#[test]
fn test_checkbox_group_with_other() {
    let html = render("@tags{A,B,*(More)}: c[]");
    assert!(html.contains("<fieldset class=\"formdown-checkbox-group\""));
    assert!(html.contains("data-formdown-other-checkbox"));
    assert!(html.contains("<span>More</span>"));
    assert!(html.contains("class=\"formdown-other-input\""));
}

#[test]
fn test_single_checkbox_text() {
    let html = render("@terms*{I agree to the terms}: c[]");
    assert!(html.contains("<label class=\"formdown-checkbox-label\" for=\"terms\">"));
    assert!(html.contains("<span>I agree to the terms</span>"));
}

#[test]
fn test_range_defaults_to_midpoint() {
    let html = render("@vol: [range min=0 max=10]");
    assert!(html.contains(
        "<input type=\"range\" id=\"vol\" name=\"vol\" form=\"formdown-form-default\" value=\"5\" min=\"0\" max=\"10\">"
    ));
    assert!(html.contains("<output for=\"vol\" id=\"vol_output\">5</output>"));
}

#[test]
fn test_description_and_error_message() {
    let html = render(
        "@pin: [text description=\"Four digits\" error-message=\"Try again\"]",
    );
    assert!(html.contains("aria-describedby=\"pin-description\""));
    assert!(html.contains("data-error-message=\"Try again\""));
    assert!(html.contains(
        "<div class=\"formdown-field-description\" id=\"pin-description\">Four digits</div>"
    ));
}

#[test]
fn test_conditions_are_exposed_as_data() {
    let html = render("@status{single,married}: s[]\n@spouse: [text visible-if=\"status == married\"]");
    assert!(html.contains("data-formdown-conditions=\"{&quot;visibleIf&quot;:"));
}

#[test]
fn test_width_becomes_container_style() {
    let html = render("@city: [text width=\"50%\"]");
    assert!(html.contains("<div class=\"formdown-field\" style=\"--formdown-field-width: 50%\">"));
    assert!(!html.contains("width=\"50%\""));
}

#[test]
#[tracing_test::traced_test]
fn test_unknown_type_renders_as_text() {
    let html = render("@rating: [stars]");
    assert!(html.contains("<input type=\"text\" id=\"rating\" name=\"rating\""));
    assert!(html.contains("data-field-type=\"stars\""));
    assert!(logs_contain("no renderer for field type"));
}
