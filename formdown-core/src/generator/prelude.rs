//! Hidden `<form>` stubs and `<datalist>` elements emitted ahead of the body

use crate::escape::escape_html;
use crate::generator::html::{attr, push_attribute, style_attr};
use crate::model::{AttributeValue, DatalistDeclaration, FormDeclaration};

/// Form layout keys that become CSS custom properties.
const LAYOUT_PROPERTIES: &[(&str, &str)] = &[
    ("label-width", "--formdown-label-width"),
    ("columns", "--formdown-columns"),
    ("gap", "--formdown-gap"),
];

/// `<form hidden id="..." ...></form>`
pub fn render_form(form: &FormDeclaration) -> String {
    let mut out = format!("<form hidden{}", attr("id", &form.id));
    let mut style = Vec::new();

    for (key, value) in &form.attributes {
        if key == "id" {
            continue;
        }
        if key == "layout" {
            out.push_str(&attr("data-layout", &value.to_string()));
        } else if let Some((_, property)) = LAYOUT_PROPERTIES.iter().find(|(k, _)| *k == key.as_str()) {
            style.push((property.to_string(), value.to_string()));
        } else if key.starts_with("--") {
            if !matches!(value, AttributeValue::Bool(_)) {
                style.push((key.clone(), value.to_string()));
            }
        } else {
            push_attribute(&mut out, key, value);
        }
    }

    out.push_str(&style_attr(&style));
    out.push_str("></form>");
    out
}

pub fn render_datalist(datalist: &DatalistDeclaration) -> String {
    let mut out = format!("<datalist{}>\n", attr("id", &datalist.id));
    for option in &datalist.options {
        out.push_str(&format!("<option value=\"{}\">\n", escape_html(option)));
    }
    out.push_str("</datalist>");
    out
}

/// All hidden forms, then all datalists, one element per line.
pub fn render_prelude(forms: &[FormDeclaration], datalists: &[DatalistDeclaration]) -> String {
    forms
        .iter()
        .map(render_form)
        .chain(datalists.iter().map(render_datalist))
        .collect::<Vec<_>>()
        .join("\n")
}
