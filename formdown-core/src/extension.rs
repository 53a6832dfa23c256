//! Field-type extensions
//!
//! This module provides a registry of renderers for field types the built-in
//! generator does not know about (or wants to override). The generator asks the
//! registry first; a renderer that returns `None` hands the field back to the
//! built-in rendering.

use crate::error::FormdownError;
use crate::model::Field;
use std::collections::HashMap;
use std::fmt;

/// What the generator knows about a field at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderMetadata<'a> {
    /// Form the field is bound to
    pub form_id: Option<&'a str>,
    /// Document-unique id allocated for the field
    pub id: &'a str,
}

/// Renderer for one custom field type.
///
/// # Examples
///
/// ```ignore
/// struct Rating;
///
/// impl FieldTypeRenderer for Rating {
///     fn name(&self) -> &str { "rating" }
///     fn render(&self, field: &Field, meta: &RenderMetadata<'_>) -> Option<String> {
///         Some(format!(r#"<div class="rating" id="{}"></div>"#, meta.id))
///     }
/// }
/// ```
pub trait FieldTypeRenderer: Send + Sync {
    /// The field type this renderer handles (e.g. "rating")
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Produce the field's complete HTML, or `None` to fall back to the built-in output.
    ///
    /// The returned markup is inserted verbatim: escaping is the renderer's job.
    fn render(&self, field: &Field, metadata: &RenderMetadata<'_>) -> Option<String>;

    /// Check a parsed field. Failures are reported, the field is kept.
    fn validate(&self, _field: &Field) -> Result<(), String> {
        Ok(())
    }
}

struct FnRenderer<F> {
    name: String,
    render: F,
}

impl<F> FieldTypeRenderer for FnRenderer<F>
where
    F: Fn(&Field, &RenderMetadata<'_>) -> Option<String> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, field: &Field, metadata: &RenderMetadata<'_>) -> Option<String> {
        (self.render)(field, metadata)
    }
}

/// Registry of field-type renderers, keyed by type name.
#[derive(Default)]
pub struct FieldTypeRegistry {
    renderers: HashMap<String, Box<dyn FieldTypeRenderer>>,
}

impl fmt::Debug for FieldTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldTypeRegistry")
            .field("types", &self.list_types())
            .finish()
    }
}

impl FieldTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a renderer, replacing any previous one for the same type.
    pub fn register<R: FieldTypeRenderer + 'static>(&mut self, renderer: R) {
        self.renderers
            .insert(renderer.name().to_string(), Box::new(renderer));
    }

    /// Register a plain function as the renderer for `name`.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, render: F)
    where
        F: Fn(&Field, &RenderMetadata<'_>) -> Option<String> + Send + Sync + 'static,
    {
        self.register(FnRenderer {
            name: name.into(),
            render,
        });
    }

    pub fn get(&self, name: &str) -> Result<&dyn FieldTypeRenderer, FormdownError> {
        self.renderers
            .get(name)
            .map(|r| r.as_ref())
            .ok_or_else(|| FormdownError::UnknownFieldType(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.renderers.contains_key(name)
    }

    /// Registered type names, sorted.
    pub fn list_types(&self) -> Vec<String> {
        let mut names: Vec<_> = self.renderers.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    /// Render `field` with the renderer for its type, if there is one and it accepts.
    pub fn render(&self, field: &Field, metadata: &RenderMetadata<'_>) -> Option<String> {
        self.renderers
            .get(&field.field_type)
            .and_then(|renderer| renderer.render(field, metadata))
    }

    /// Validate `field` with the renderer for its type. Types without a renderer pass.
    pub fn validate(&self, field: &Field) -> Result<(), FormdownError> {
        match self.renderers.get(&field.field_type) {
            Some(renderer) => renderer
                .validate(field)
                .map_err(|message| FormdownError::Validation {
                    field: field.name().to_string(),
                    message,
                }),
            None => Ok(()),
        }
    }
}
