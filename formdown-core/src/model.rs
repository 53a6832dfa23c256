//! Structured records produced by the parser and consumed by the generator
//!
//!     A single parse pass over one document yields four record kinds: fields, form
//!     declarations, datalists and groups. They carry no identity beyond the document
//!     they came from and are consumed by exactly one generate pass.
//!
//!     All records serialize with camelCase keys so the JSON shape produced by the CLI
//!     matches what browser-side tooling expects (`allowOther`, `formDeclarations`, ...).

use crate::syntax::label::smart_label;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field types rendered by the built-in generator.
pub const BUILTIN_TYPES: &[&str] = &[
    "text",
    "email",
    "password",
    "number",
    "tel",
    "url",
    "date",
    "time",
    "datetime-local",
    "month",
    "week",
    "color",
    "file",
    "range",
    "textarea",
    "select",
    "radio",
    "checkbox",
    "submit",
    "reset",
    "button",
    "image",
];

/// Types rendered as a single, unwrapped action element.
pub const BUTTON_TYPES: &[&str] = &["submit", "reset", "button", "image"];

/// Whether `field_type` belongs to the built-in vocabulary.
pub fn is_builtin_type(field_type: &str) -> bool {
    BUILTIN_TYPES.contains(&field_type)
}

/// Typed value of a bracketed attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the value; numeric strings are accepted.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Integer(i) => Some(*i as f64),
            AttributeValue::Float(f) => Some(*f),
            AttributeValue::String(s) => s.trim().parse().ok(),
            AttributeValue::Bool(_) => None,
        }
    }

    /// `true`, or the string `"true"` in any case.
    pub fn is_truthy(&self) -> bool {
        match self {
            AttributeValue::Bool(b) => *b,
            AttributeValue::String(s) => s.trim().eq_ignore_ascii_case("true"),
            AttributeValue::Integer(_) | AttributeValue::Float(_) => false,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(b) => write!(f, "{b}"),
            AttributeValue::Integer(i) => write!(f, "{i}"),
            AttributeValue::Float(n) => write!(f, "{n}"),
            AttributeValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

/// Insertion-ordered attribute mapping. Order follows the source text so that
/// generated markup is deterministic.
pub type Attributes = IndexMap<String, AttributeValue>;

fn is_false(b: &bool) -> bool {
    !*b
}

/// Comparison used by a conditional-logic rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionOperator {
    #[serde(rename = "==")]
    Equals,
    #[serde(rename = "!=")]
    NotEquals,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = "truthy")]
    Truthy,
}

/// One `{field, operator, value?}` rule. Rules are carried through to the output,
/// never evaluated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operator: ConditionOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_if: Option<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden_if: Option<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_if: Option<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled_if: Option<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_if: Option<Condition>,
}

impl Conditions {
    pub fn is_empty(&self) -> bool {
        self.visible_if.is_none()
            && self.hidden_if.is_none()
            && self.enabled_if.is_none()
            && self.disabled_if.is_none()
            && self.required_if.is_none()
    }
}

/// One form control or action element.
///
/// The name is fixed at construction; `attributes["form"]` is written once by the
/// parser's form association and is the only form binding the generator reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<AttributeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_other: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_label: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub inline: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Conditions>,
    #[serde(default)]
    pub attributes: Attributes,
    /// Line index (0-based) where the field was recognized.
    #[serde(default)]
    pub position: usize,
}

impl Field {
    /// Create a field whose label is derived from `name`.
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        let name = name.into();
        let label = smart_label(&name);
        Field {
            name,
            field_type: field_type.into(),
            label,
            required: false,
            placeholder: None,
            pattern: None,
            format: None,
            content: None,
            value: None,
            description: None,
            error_message: None,
            options: None,
            allow_other: false,
            other_label: None,
            inline: false,
            group: None,
            conditions: None,
            attributes: Attributes::new(),
            position: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the form this field is bound to, if association ran.
    pub fn form_id(&self) -> Option<&str> {
        self.attributes.get("form").and_then(AttributeValue::as_str)
    }

    /// submit/reset/button/image render as a single unwrapped element.
    pub fn is_button(&self) -> bool {
        BUTTON_TYPES.contains(&self.field_type.as_str())
    }
}

/// A hidden `<form>` stub that fields reference through their `form` attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDeclaration {
    pub id: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

/// Named list of autocomplete suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatalistDeclaration {
    pub id: String,
    pub options: Vec<String>,
}

/// A `## [Label]` fieldset group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDeclaration {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub collapsible: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub collapsed: bool,
}

/// Output of [`crate::parse_formdown`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDocument {
    /// Markdown with every recognized construct replaced by a placeholder
    pub markdown: String,
    /// Fields in document order; placeholder indices index into this list
    pub forms: Vec<Field>,
    pub form_declarations: Vec<FormDeclaration>,
    pub datalist_declarations: Vec<DatalistDeclaration>,
    pub group_declarations: Vec<GroupDeclaration>,
}

/// Output of the legacy [`crate::parse`] entry point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyParseResult {
    pub fields: Vec<Field>,
    pub errors: Vec<String>,
}
