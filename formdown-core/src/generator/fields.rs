//! Built-in per-type field rendering
//!
//!     Every control carries `form="<id>"` instead of being nested in a `<form>`, so
//!     fields can sit anywhere in the prose. Author text is escaped everywhere; no
//!     inline script is ever produced. Interactive behaviour (write-in options,
//!     conditions) is exposed through `data-formdown-*` hooks only.
//!
//!     Write-in ("other") inputs carry no `name`. The client merges their value into
//!     the owning control.

use crate::escape::escape_html;
use crate::generator::html::{attr, flag, render_attributes, style_attr};
use crate::generator::ids::IdAllocator;
use crate::model::{is_builtin_type, AttributeValue, Field};
use crate::syntax::label::smart_label;

const REQUIRED_MARKER: &str = r#"<span class="required" aria-label="required">*</span>"#;

/// Attributes the renderers write themselves, or that are layout hints.
const RESERVED: &[&str] = &["form", "id", "name", "type", "width", "span"];
const IMAGE_RESERVED: &[&str] = &["form", "id", "name", "type", "width", "span", "src", "alt"];

/// Render the control for a block field (without the layout wrapper).
pub fn render_control(
    field: &Field,
    id: &str,
    form_id: Option<&str>,
    ids: &mut IdAllocator,
) -> String {
    let has_options = field.options.as_ref().is_some_and(|o| !o.is_empty());

    match field.field_type.as_str() {
        "textarea" => render_textarea(field, id, form_id),
        "select" => render_select(field, id, form_id, ids),
        "radio" => render_choice_group(field, "radio", form_id, ids),
        "checkbox" if has_options => render_choice_group(field, "checkbox", form_id, ids),
        "checkbox" => render_single_checkbox(field, id, form_id),
        "range" => render_range(field, id, form_id, ids),
        "submit" | "reset" | "button" => render_button(field, id, form_id),
        "image" => render_image(field, id, form_id),
        t if is_builtin_type(t) => render_input(field, id, form_id, t, ""),
        other => {
            tracing::warn!(
                field = %field.name(),
                field_type = %other,
                "no renderer for field type; rendering as text"
            );
            render_input(field, id, form_id, "text", &attr("data-field-type", other))
        }
    }
}

/// Wrap a non-button control in the field container.
pub fn wrap_field(field: &Field, inner: &str) -> String {
    let mut style = Vec::new();
    for (key, value) in &field.attributes {
        match key.as_str() {
            "width" => style.push(("--formdown-field-width".to_string(), value.to_string())),
            "span" => style.push(("--formdown-field-span".to_string(), value.to_string())),
            k if k.starts_with("--") && !matches!(value, AttributeValue::Bool(_)) => {
                style.push((key.clone(), value.to_string()))
            }
            _ => {}
        }
    }
    format!(
        "<div class=\"formdown-field-container\">\n<div class=\"formdown-field\"{}>\n{inner}\n</div>\n</div>",
        style_attr(&style)
    )
}

/// An inline field: an editable span inside the surrounding paragraph.
pub fn render_inline(field: &Field, id: &str, form_id: Option<&str>) -> String {
    let mut out = String::from(r#"<span contenteditable="true""#);
    out.push_str(&attr("data-field-name", field.name()));
    out.push_str(&attr("data-field-type", &field.field_type));
    out.push_str(r#" role="textbox" class="formdown-inline-field""#);
    out.push_str(&attr("id", id));
    if let Some(form) = form_id {
        out.push_str(&attr("data-form", form));
    }
    out.push_str(&attr("aria-label", &field.label));
    if let Some(placeholder) = &field.placeholder {
        out.push_str(&attr("data-placeholder", placeholder));
    }
    if let Some(pattern) = &field.pattern {
        out.push_str(&attr("data-pattern", pattern));
    }
    if field.required {
        out.push_str(r#" aria-required="true""#);
    }
    out.push_str(&metadata_attrs(field, id));
    out.push('>');
    out.push_str(&escape_html(&field.label));
    out.push_str("</span>");
    out
}

fn form_attr(form_id: Option<&str>) -> String {
    form_id.map(|form| attr("form", form)).unwrap_or_default()
}

fn label_html(field: &Field, id: &str) -> String {
    format!(
        "<label for=\"{}\">{}{}</label>",
        escape_html(id),
        escape_html(&field.label),
        required_marker(field)
    )
}

fn required_marker(field: &Field) -> &'static str {
    if field.required {
        REQUIRED_MARKER
    } else {
        ""
    }
}

/// `aria-describedby`, `data-error-message` and `data-formdown-conditions`.
fn metadata_attrs(field: &Field, id: &str) -> String {
    let mut out = String::new();
    if field.description.is_some() {
        out.push_str(&attr("aria-describedby", &format!("{id}-description")));
    }
    if let Some(message) = &field.error_message {
        out.push_str(&attr("data-error-message", message));
    }
    if let Some(conditions) = &field.conditions {
        if let Ok(json) = serde_json::to_string(conditions) {
            out.push_str(&attr("data-formdown-conditions", &json));
        }
    }
    out
}

fn description_html(field: &Field, id: &str) -> String {
    match &field.description {
        Some(text) => format!(
            "\n<div class=\"formdown-field-description\" id=\"{}-description\">{}</div>",
            escape_html(id),
            escape_html(text)
        ),
        None => String::new(),
    }
}

fn render_input(
    field: &Field,
    id: &str,
    form_id: Option<&str>,
    input_type: &str,
    extra: &str,
) -> String {
    let mut tag = format!(
        "<input{}{}{}",
        attr("type", input_type),
        attr("id", id),
        attr("name", field.name())
    );
    tag.push_str(&form_attr(form_id));
    tag.push_str(&flag("required", field.required));
    if let Some(placeholder) = &field.placeholder {
        tag.push_str(&attr("placeholder", placeholder));
    }
    if let Some(pattern) = &field.pattern {
        tag.push_str(&attr("pattern", pattern));
    }
    if input_type != "file" {
        if let Some(value) = &field.value {
            tag.push_str(&attr("value", &value.to_string()));
        }
    }
    if let Some(format) = &field.format {
        tag.push_str(&attr("data-format", format));
    }
    tag.push_str(extra);
    tag.push_str(&metadata_attrs(field, id));
    tag.push_str(&render_attributes(&field.attributes, RESERVED));
    tag.push('>');

    format!(
        "{}\n{tag}{}",
        label_html(field, id),
        description_html(field, id)
    )
}

fn render_textarea(field: &Field, id: &str, form_id: Option<&str>) -> String {
    let mut tag = format!("<textarea{}{}", attr("id", id), attr("name", field.name()));
    tag.push_str(&form_attr(form_id));
    tag.push_str(&flag("required", field.required));
    if let Some(placeholder) = &field.placeholder {
        tag.push_str(&attr("placeholder", placeholder));
    }
    tag.push_str(&metadata_attrs(field, id));
    tag.push_str(&render_attributes(&field.attributes, RESERVED));
    tag.push('>');

    let value = field
        .value
        .as_ref()
        .map(|v| escape_html(&v.to_string()))
        .unwrap_or_default();

    format!(
        "{}\n{tag}{value}</textarea>{}",
        label_html(field, id),
        description_html(field, id)
    )
}

/// Whether `option` is pre-selected by the field's value.
fn is_selected(field: &Field, option: &str, multiple: bool) -> bool {
    let Some(value) = &field.value else {
        return false;
    };
    let value = value.to_string();
    if multiple {
        value.split(',').any(|v| v.trim() == option)
    } else {
        value == option
    }
}

fn other_label(field: &Field) -> &str {
    field.other_label.as_deref().unwrap_or("Other")
}

fn other_input(field: &Field, form_id: Option<&str>, ids: &mut IdAllocator) -> String {
    let id = ids.allocate(&format!("{}_other", field.name()), form_id);
    format!(
        "<input type=\"text\"{} class=\"formdown-other-input\"{}{} placeholder=\"Please specify...\" hidden>",
        attr("id", &id),
        form_attr(form_id),
        attr("data-formdown-other-for", field.name()),
    )
}

fn render_select(
    field: &Field,
    id: &str,
    form_id: Option<&str>,
    ids: &mut IdAllocator,
) -> String {
    let multiple = field
        .attributes
        .get("multiple")
        .is_some_and(AttributeValue::is_truthy);

    let mut out = label_html(field, id);
    out.push_str(&format!(
        "\n<select{}{}",
        attr("id", id),
        attr("name", field.name())
    ));
    out.push_str(&form_attr(form_id));
    out.push_str(&flag("required", field.required));
    out.push_str(&metadata_attrs(field, id));
    out.push_str(&render_attributes(&field.attributes, RESERVED));
    out.push_str(">\n");

    if let Some(placeholder) = &field.placeholder {
        out.push_str(&format!(
            "<option value=\"\">{}</option>\n",
            escape_html(placeholder)
        ));
    }
    for option in field.options.iter().flatten() {
        out.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            escape_html(option),
            flag("selected", is_selected(field, option, multiple)),
            escape_html(option)
        ));
    }
    if field.allow_other {
        out.push_str(&format!(
            "<option value=\"\">{} (please specify)</option>\n",
            escape_html(other_label(field))
        ));
    }
    out.push_str("</select>");

    if field.allow_other {
        out.push('\n');
        out.push_str(&other_input(field, form_id, ids));
    }
    out.push_str(&description_html(field, id));
    out
}

/// Radio group or checkbox group: one labelled input per option inside a fieldset.
fn render_choice_group(
    field: &Field,
    input_type: &str,
    form_id: Option<&str>,
    ids: &mut IdAllocator,
) -> String {
    let group_id = ids.allocate(&format!("{}_group", field.name()), form_id);
    let extras = render_attributes(&field.attributes, RESERVED);
    let options = field.options.as_deref().unwrap_or_default();

    let mut out = format!(
        "<fieldset class=\"formdown-{input_type}-group\"{}{}>\n<legend>{}{}</legend>\n",
        attr("id", &group_id),
        metadata_attrs(field, &group_id),
        escape_html(&field.label),
        required_marker(field)
    );

    for (index, option) in options.iter().enumerate() {
        let option_id = ids.allocate(&format!("{}_{index}", field.name()), form_id);
        out.push_str(&format!(
            "<label class=\"formdown-option-label\"><input type=\"{input_type}\"{}{}{}{}{}{}{extras}><span>{}</span></label>\n",
            attr("id", &option_id),
            attr("name", field.name()),
            attr("value", option),
            form_attr(form_id),
            flag("required", field.required && index == 0),
            flag("checked", is_selected(field, option, input_type == "checkbox")),
            escape_html(option)
        ));
    }

    if field.allow_other {
        let option_id = ids.allocate(&format!("{}_{}", field.name(), options.len()), form_id);
        out.push_str(&format!(
            "<label class=\"formdown-option-label\"><input type=\"{input_type}\"{}{} value=\"\"{} data-formdown-other-{input_type}{extras}><span>{}</span></label>\n",
            attr("id", &option_id),
            attr("name", field.name()),
            form_attr(form_id),
            escape_html(other_label(field))
        ));
        out.push_str(&other_input(field, form_id, ids));
        out.push('\n');
    }

    out.push_str("</fieldset>");
    out.push_str(&description_html(field, &group_id));
    out
}

fn render_single_checkbox(field: &Field, id: &str, form_id: Option<&str>) -> String {
    let text = [field.content.as_deref(), Some(field.label.as_str())]
        .into_iter()
        .flatten()
        .find(|t| !t.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| smart_label(field.name()));
    let checked = field.value.as_ref().is_some_and(AttributeValue::is_truthy);

    let mut tag = format!(
        "<input type=\"checkbox\"{}{}",
        attr("id", id),
        attr("name", field.name())
    );
    tag.push_str(&form_attr(form_id));
    tag.push_str(&flag("required", field.required));
    tag.push_str(&flag("checked", checked));
    tag.push_str(&metadata_attrs(field, id));
    tag.push_str(&render_attributes(&field.attributes, RESERVED));
    tag.push('>');

    format!(
        "<label class=\"formdown-checkbox-label\"{}>{tag}<span>{}</span>{}</label>{}",
        attr("for", id),
        escape_html(&text),
        required_marker(field),
        description_html(field, id)
    )
}

fn number_text(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn render_range(
    field: &Field,
    id: &str,
    form_id: Option<&str>,
    ids: &mut IdAllocator,
) -> String {
    let bound = |key: &str, default: f64| {
        field
            .attributes
            .get(key)
            .and_then(AttributeValue::as_f64)
            .unwrap_or(default)
    };
    let value = match &field.value {
        Some(value) => value.to_string(),
        None => number_text((bound("min", 0.0) + bound("max", 100.0)) / 2.0),
    };

    let mut tag = format!(
        "<input type=\"range\"{}{}",
        attr("id", id),
        attr("name", field.name())
    );
    tag.push_str(&form_attr(form_id));
    tag.push_str(&flag("required", field.required));
    tag.push_str(&attr("value", &value));
    tag.push_str(&metadata_attrs(field, id));
    tag.push_str(&render_attributes(&field.attributes, RESERVED));
    tag.push('>');

    let output_id = ids.allocate(&format!("{id}_output"), form_id);
    format!(
        "{}\n{tag}\n<output{}{}>{}</output>{}",
        label_html(field, id),
        attr("for", id),
        attr("id", &output_id),
        escape_html(&value),
        description_html(field, id)
    )
}

fn render_button(field: &Field, id: &str, form_id: Option<&str>) -> String {
    let fallback = match field.field_type.as_str() {
        "submit" => "Submit",
        "reset" => "Reset",
        _ => "Button",
    };
    let text = if field.label.trim().is_empty() {
        fallback
    } else {
        field.label.as_str()
    };
    format!(
        "<button{}{} class=\"formdown-button\"{}{}{}>{}</button>",
        attr("type", &field.field_type),
        attr("id", id),
        form_attr(form_id),
        metadata_attrs(field, id),
        render_attributes(&field.attributes, RESERVED),
        escape_html(text)
    )
}

fn render_image(field: &Field, id: &str, form_id: Option<&str>) -> String {
    let src = field
        .attributes
        .get("src")
        .map(ToString::to_string)
        .unwrap_or_default();
    let alt = field
        .attributes
        .get("alt")
        .map(ToString::to_string)
        .unwrap_or_else(|| field.label.clone());
    format!(
        "<input type=\"image\"{} class=\"formdown-button\"{}{}{}{}{}>",
        attr("id", id),
        attr("src", &src),
        attr("alt", &alt),
        form_attr(form_id),
        metadata_attrs(field, id),
        render_attributes(&field.attributes, IMAGE_RESERVED)
    )
}
