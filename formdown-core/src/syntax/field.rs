//! Field builder
//!
//!     Turns a recognized declaration into a [`Field`]. The first bare token of the
//!     bracket body names the type (unless a type sigil already did), and the
//!     attribute keys that have a first-class home on `Field` are moved out of the
//!     catch-all `attributes` map. Everything else stays in `attributes` verbatim and
//!     in source order.

use crate::error::FormdownError;
use crate::model::{AttributeValue, Attributes, Condition, ConditionOperator, Conditions, Field};
use crate::syntax::attributes::{attribute_tokens, parse_attributes};
use crate::syntax::shorthand::{
    extract_other_option, interpret_content, split_options, ContentEffect, FieldSpec,
};

/// Bare tokens that are boolean HTML attributes, never a type name.
pub const FLAG_ATTRIBUTES: &[&str] = &[
    "required",
    "disabled",
    "readonly",
    "multiple",
    "autofocus",
    "checked",
    "hidden",
    "novalidate",
    "allow-other",
];

/// A built field plus the suggestion list its content asked for.
///
/// Implicit datalists need document-level ids, so the parser registers them and
/// points the field's `list` attribute at the result.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDraft {
    pub field: Field,
    pub suggestions: Option<Vec<String>>,
}

/// A numeric default keeps its spelling (`1.0`, `007`) when coercion would change it.
fn written_value(value: AttributeValue, lexeme: Option<&str>) -> AttributeValue {
    match (&value, lexeme) {
        (AttributeValue::Integer(_) | AttributeValue::Float(_), Some(raw))
            if value.to_string() != raw =>
        {
            AttributeValue::from(raw)
        }
        _ => value,
    }
}

/// Names must be non-empty and must not start with a digit.
pub fn validate_name(name: &str) -> Result<(), FormdownError> {
    match name.chars().next() {
        Some(first) if !first.is_ascii_digit() => Ok(()),
        _ => Err(FormdownError::InvalidFieldName(name.to_string())),
    }
}

pub fn build_field(spec: &FieldSpec<'_>, inline: bool) -> Result<FieldDraft, FormdownError> {
    validate_name(spec.name)?;

    let mut attrs = parse_attributes(spec.body);
    let value_lexeme = attribute_tokens(spec.body)
        .into_iter()
        .filter(|token| token.key == "value")
        .last()
        .map(|token| token.lexeme);
    let field_type = resolve_type(spec, &mut attrs);

    let mut field = Field::new(spec.name, field_type);
    field.inline = inline;
    field.required = spec.required;

    if let Some(rows) = spec.marker.and_then(|m| m.rows) {
        attrs
            .entry("rows".to_string())
            .or_insert(AttributeValue::Integer(i64::from(rows)));
    }

    let mut conditions = Conditions::default();
    let mut remaining = Attributes::new();

    for (key, value) in attrs {
        match key.as_str() {
            "required" => field.required |= is_required(&value),
            "label" => field.label = value.to_string(),
            "placeholder" => field.placeholder = Some(value.to_string()),
            "pattern" => field.pattern = Some(value.to_string()),
            "format" => field.format = Some(value.to_string()),
            "content" => field.content = Some(value.to_string()),
            "description" => field.description = Some(value.to_string()),
            "error-message" | "errorMessage" => field.error_message = Some(value.to_string()),
            "value" => field.value = Some(written_value(value, value_lexeme)),
            "options" => {
                let (options, allow_other, other_label) =
                    extract_other_option(split_options(&value.to_string()));
                field.options = Some(options);
                if allow_other {
                    field.allow_other = true;
                    field.other_label = field.other_label.take().or(other_label);
                }
            }
            "allow-other" | "allowOther" => field.allow_other |= value.is_truthy(),
            "other-label" | "otherLabel" => field.other_label = Some(value.to_string()),
            "visible-if" => conditions.visible_if = parse_condition(&value),
            "hidden-if" => conditions.hidden_if = parse_condition(&value),
            "enabled-if" => conditions.enabled_if = parse_condition(&value),
            "disabled-if" => conditions.disabled_if = parse_condition(&value),
            "required-if" => conditions.required_if = parse_condition(&value),
            _ => {
                remaining.insert(key, value);
            }
        }
    }

    // A head label outranks `label=`.
    if let Some(label) = spec.label.map(str::trim).filter(|l| !l.is_empty()) {
        field.label = label.to_string();
    }

    let mut suggestions = None;
    if let Some(content) = spec.content {
        match content_effect(&field.field_type, content) {
            Some(ContentEffect::Options {
                options,
                allow_other,
                other_label,
            }) => {
                if field.options.is_none() {
                    field.options = Some(options);
                }
                if allow_other {
                    field.allow_other = true;
                    if field.other_label.is_none() {
                        field.other_label = other_label;
                    }
                }
            }
            Some(ContentEffect::Format(format)) => {
                field.format.get_or_insert(format);
            }
            Some(ContentEffect::Pattern(pattern)) => {
                field.pattern.get_or_insert(pattern);
            }
            Some(ContentEffect::Datalist(options)) => suggestions = Some(options),
            None => {
                field.content.get_or_insert_with(|| content.to_string());
            }
        }
    }

    if !conditions.is_empty() {
        field.conditions = Some(conditions);
    }
    field.attributes = remaining;

    Ok(FieldDraft { field, suggestions })
}

/// A single checkbox's `{text}` is display content, not a one-entry option list.
fn content_effect(field_type: &str, content: &str) -> Option<ContentEffect> {
    let single_checkbox = field_type == "checkbox"
        && !content.contains(',')
        && !split_options(content).iter().any(|o| o.starts_with('*'));
    if single_checkbox {
        None
    } else {
        Some(interpret_content(field_type, content))
    }
}

fn resolve_type(spec: &FieldSpec<'_>, attrs: &mut Attributes) -> String {
    let leading = attrs
        .first()
        .filter(|(_, value)| **value == AttributeValue::Bool(true))
        .map(|(key, _)| key.clone());

    if let Some(marker) = spec.marker {
        // `@x: @[email]` is redundant but harmless; drop the duplicate type token.
        if leading
            .as_deref()
            .is_some_and(crate::model::is_builtin_type)
        {
            attrs.shift_remove_index(0);
        }
        return marker.field_type.to_string();
    }

    match leading {
        Some(token) if !FLAG_ATTRIBUTES.contains(&token.as_str()) => {
            attrs.shift_remove_index(0);
            token
        }
        _ => "text".to_string(),
    }
}

fn is_required(value: &AttributeValue) -> bool {
    match value {
        AttributeValue::Bool(b) => *b,
        AttributeValue::String(s) => !s.trim().eq_ignore_ascii_case("false"),
        AttributeValue::Integer(n) => *n != 0,
        AttributeValue::Float(f) => *f != 0.0,
    }
}

const OPERATORS: &[(&str, ConditionOperator)] = &[
    (">=", ConditionOperator::GreaterOrEqual),
    ("<=", ConditionOperator::LessOrEqual),
    ("==", ConditionOperator::Equals),
    ("!=", ConditionOperator::NotEquals),
    (">", ConditionOperator::GreaterThan),
    ("<", ConditionOperator::LessThan),
    ("=", ConditionOperator::Equals),
];

/// Parse `field`, `field op value` or `field op "value"`.
pub fn parse_condition(value: &AttributeValue) -> Option<Condition> {
    let expr = match value {
        AttributeValue::String(s) => s.trim(),
        _ => return None,
    };

    for (idx, _) in expr.char_indices() {
        let rest = &expr[idx..];
        let Some((symbol, operator)) = OPERATORS.iter().find(|(op, _)| rest.starts_with(op))
        else {
            continue;
        };
        let field = expr[..idx].trim();
        if field.is_empty() {
            return None;
        }
        let value = strip_quotes(rest[symbol.len()..].trim());
        return Some(Condition {
            field: field.to_string(),
            operator: *operator,
            value: Some(value.to_string()),
        });
    }

    if expr.is_empty() || expr.contains(char::is_whitespace) {
        return None;
    }
    Some(Condition {
        field: expr.to_string(),
        operator: ConditionOperator::Truthy,
        value: None,
    })
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
