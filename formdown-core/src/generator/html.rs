//! Attribute writing helpers shared by the preludes and field renderers

use crate::escape::escape_html;
use crate::model::{AttributeValue, Attributes};
use crate::syntax::attributes::is_attribute_name;

/// ` name="value"` with the value escaped.
pub fn attr(name: &str, value: &str) -> String {
    format!(" {name}=\"{}\"", escape_html(value))
}

/// ` name` when `on`, nothing otherwise.
pub fn flag(name: &str, on: bool) -> String {
    if on {
        format!(" {name}")
    } else {
        String::new()
    }
}

/// `on*` attributes would be inline script; they are never written.
pub fn is_event_handler(key: &str) -> bool {
    key.len() > 2 && key.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("on"))
}

/// Write one author-supplied attribute. Booleans become flags (`false` is dropped),
/// everything else is escaped. Unsafe or malformed names are skipped.
pub fn push_attribute(out: &mut String, key: &str, value: &AttributeValue) {
    if is_event_handler(key) {
        tracing::warn!(attribute = %key, "event handler attributes are not emitted");
        return;
    }
    if !is_attribute_name(key) {
        return;
    }
    match value {
        AttributeValue::Bool(true) => out.push_str(&flag(key, true)),
        AttributeValue::Bool(false) => {}
        other => out.push_str(&attr(key, &other.to_string())),
    }
}

/// Collect `name: value` declarations into a ` style="..."` attribute.
pub fn style_attr(declarations: &[(String, String)]) -> String {
    if declarations.is_empty() {
        return String::new();
    }
    let css = declarations
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join("; ");
    attr("style", &css)
}

/// Write every attribute except those in `skip`.
pub fn render_attributes(attributes: &Attributes, skip: &[&str]) -> String {
    let mut out = String::new();
    for (key, value) in attributes {
        if skip.contains(&key.as_str()) || key.starts_with("--") {
            continue;
        }
        push_attribute(&mut out, key, value);
    }
    out
}
