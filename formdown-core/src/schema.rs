//! Read-only schema projection over parsed fields

use crate::model::{AttributeValue, Field, ParsedDocument};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Validation-relevant attributes carried into the schema.
const VALIDATION_KEYS: &[&str] = &["min", "max", "minlength", "maxlength", "step"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(flatten)]
    pub constraints: IndexMap<String, AttributeValue>,
}

impl FieldValidation {
    pub fn is_empty(&self) -> bool {
        self.pattern.is_none() && self.constraints.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    #[serde(rename = "type")]
    pub field_type: String,
    pub label: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
    /// Index of the field in document order
    pub position: usize,
    pub is_inline: bool,
}

pub type Schema = IndexMap<String, FieldSchema>;

impl From<(usize, &Field)> for FieldSchema {
    fn from((position, field): (usize, &Field)) -> Self {
        let validation = FieldValidation {
            pattern: field.pattern.clone(),
            constraints: VALIDATION_KEYS
                .iter()
                .filter_map(|key| {
                    field
                        .attributes
                        .get(*key)
                        .map(|value| (key.to_string(), value.clone()))
                })
                .collect(),
        };
        FieldSchema {
            field_type: field.field_type.clone(),
            label: field.label.clone(),
            required: field.required,
            options: field.options.clone(),
            validation: (!validation.is_empty()).then_some(validation),
            position,
            is_inline: field.inline,
        }
    }
}

/// Project parsed fields to a name-keyed schema. A repeated name keeps its first field.
pub fn schema_of(doc: &ParsedDocument) -> Schema {
    let mut schema = Schema::new();
    for (position, field) in doc.forms.iter().enumerate() {
        schema
            .entry(field.name().to_string())
            .or_insert_with(|| FieldSchema::from((position, field)));
    }
    schema
}
