//! `@form[...]` declarations and field-to-form association
//!
//!     Association is a single forward scan. When a field is extracted it is bound,
//!     once, through `attributes["form"]`:
//!
//!     1. an explicit `form=<id>` naming a form declared *above* the field is kept;
//!        an unknown id is reported and replaced by the fallback below
//!     2. otherwise the most recent `@form` above the field
//!     3. otherwise the implicit default form, created on first use
//!
//!     A field can therefore never bind to a form declared further down unless that
//!     form was already registered when the field line was reached.

use crate::model::{AttributeValue, Attributes, Field, FormDeclaration};
use crate::parser::context::ParseContext;
use crate::syntax::attributes::parse_attributes;
use crate::syntax::shorthand::take_bracket;

/// Id of the implicit fallback form.
pub const DEFAULT_FORM_ID: &str = "formdown-form-default";

/// Prefix of generated form ids (`formdown-form-1`, `formdown-form-2`, ...).
pub const FORM_ID_PREFIX: &str = "formdown-form-";

/// Attributes of the implicit default form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultForm {
    pub action: String,
    pub method: String,
}

impl Default for DefaultForm {
    fn default() -> Self {
        DefaultForm {
            action: ".".to_string(),
            method: "GET".to_string(),
        }
    }
}

impl DefaultForm {
    pub fn declaration(&self) -> FormDeclaration {
        let mut attributes = Attributes::new();
        attributes.insert("action".to_string(), AttributeValue::from(self.action.as_str()));
        attributes.insert("method".to_string(), AttributeValue::from(self.method.as_str()));
        FormDeclaration {
            id: DEFAULT_FORM_ID.to_string(),
            attributes,
            position: None,
        }
    }
}

/// Match a whole line as `@form[attrs]`. An unterminated bracket is no match.
pub fn match_form_declaration(line: &str) -> Option<Attributes> {
    let rest = line.trim().strip_prefix("@form")?;
    let (body, tail) = take_bracket(rest)?;
    if !tail.trim().is_empty() {
        return None;
    }
    Some(parse_attributes(body))
}

impl ParseContext<'_> {
    /// Register a form declaration and make it the current form.
    ///
    /// A repeated id keeps the first declaration; the repeat only moves the
    /// current-form pointer.
    pub(crate) fn declare_form(&mut self, mut attributes: Attributes) {
        let explicit = attributes
            .shift_remove("id")
            .map(|id| id.to_string().trim().to_string())
            .filter(|id| !id.is_empty());

        let id = match explicit {
            Some(id) => id,
            None => {
                let id = format!("{FORM_ID_PREFIX}{}", self.form_counter);
                self.form_counter += 1;
                id
            }
        };

        if self.forms.iter().any(|form| form.id == id) {
            tracing::debug!(form = %id, "duplicate form id; keeping the first declaration");
        } else {
            self.forms.push(FormDeclaration {
                id: id.clone(),
                attributes,
                position: Some(self.line),
            });
        }
        self.current_form = Some(id);
    }

    /// Bind `field` to a form by writing `attributes["form"]`.
    pub(crate) fn associate(&mut self, field: &mut Field) {
        let explicit = field
            .attributes
            .get("form")
            .map(|value| value.to_string().trim().to_string());

        let form_id = match explicit {
            Some(id) if self.forms.iter().any(|form| form.id == id) => id,
            Some(id) => {
                tracing::warn!(
                    field = %field.name(),
                    form = %id,
                    "field references an unknown form; using the current form instead"
                );
                self.diagnose(format!(
                    "field '{}' references unknown form '{id}'",
                    field.name()
                ));
                self.fallback_form()
            }
            None => self.fallback_form(),
        };

        field
            .attributes
            .insert("form".to_string(), AttributeValue::String(form_id));
    }

    fn fallback_form(&mut self) -> String {
        match &self.current_form {
            Some(id) => id.clone(),
            None => self.ensure_default_form(),
        }
    }

    pub(crate) fn ensure_default_form(&mut self) -> String {
        if !self.default_form_created {
            self.default_form_created = true;
            if !self.forms.iter().any(|form| form.id == DEFAULT_FORM_ID) {
                self.forms.push(self.default_form.declaration());
            }
        }
        DEFAULT_FORM_ID.to_string()
    }
}
