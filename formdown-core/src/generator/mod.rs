//! HTML generation
//!
//!     Generation runs in three steps over one [`ParsedDocument`]:
//!
//!     1. the placeholder-laden markdown is rendered by comrak
//!     2. every placeholder is substituted, left to right in a single pass, with
//!        group fieldsets, inline spans or block controls
//!     3. hidden `<form>` stubs and `<datalist>`s are prepended
//!
//!     Ids are allocated during substitution by an [`IdAllocator`] created per call,
//!     so uniqueness is scoped to one output document and allocation follows
//!     document order.
//!
//!     A field's form is `attributes["form"]` as written by the parser. For
//!     hand-built documents without it, the fallback is the nearest form declared at
//!     or above the field's `position`, else the first form. No second association
//!     pass exists.

pub mod document;
pub mod fields;
pub mod html;
pub mod ids;
pub mod markdown;
pub mod prelude;

pub use document::wrap_document;
pub use ids::IdAllocator;
pub use markdown::MarkdownOptions;

use crate::escape::escape_html;
use crate::extension::{FieldTypeRegistry, RenderMetadata};
use crate::model::{Field, FormDeclaration, GroupDeclaration, ParsedDocument};
use crate::parser::forms::DefaultForm;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"<!--FORMDOWN_FIELD_(?P<field>\d+)-->",
        r"|<!--FORMDOWN_GROUP_START_(?P<start>\d+)-->",
        r"|<!--FORMDOWN_GROUP_END_(?P<end>\d+)-->",
        r#"|<span data-formdown-inline="(?P<inline>\d+)"[^>]*></span>"#,
    ))
    .unwrap()
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    pub markdown: MarkdownOptions,
    /// Used when a document has fields but no form declarations
    pub default_form: DefaultForm,
}

/// Turns parsed documents into HTML. Reusable; holds no per-document state.
#[derive(Debug, Default)]
pub struct HtmlGenerator {
    options: GenerateOptions,
    registry: FieldTypeRegistry,
}

impl HtmlGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: GenerateOptions) -> Self {
        HtmlGenerator {
            options,
            registry: FieldTypeRegistry::new(),
        }
    }

    pub fn with_registry(mut self, registry: FieldTypeRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    pub fn registry(&self) -> &FieldTypeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut FieldTypeRegistry {
        &mut self.registry
    }

    pub fn generate(&self, doc: &ParsedDocument) -> String {
        let forms: Cow<'_, [FormDeclaration]> =
            if doc.form_declarations.is_empty() && !doc.forms.is_empty() {
                Cow::Owned(vec![self.options.default_form.declaration()])
            } else {
                Cow::Borrowed(doc.form_declarations.as_slice())
            };

        let mut ids = IdAllocator::new();
        for form in forms.iter() {
            ids.reserve(&form.id);
        }
        for datalist in &doc.datalist_declarations {
            ids.reserve(&datalist.id);
        }

        let mut state = RenderState {
            registry: &self.registry,
            fields: &doc.forms,
            forms: &forms,
            groups: &doc.group_declarations,
            ids,
        };

        let rendered = markdown::render_markdown(&doc.markdown, &self.options.markdown);
        let body = PLACEHOLDER
            .replace_all(&rendered, |caps: &Captures<'_>| state.substitute(caps))
            .into_owned();

        let prelude = prelude::render_prelude(&forms, &doc.datalist_declarations);

        tracing::debug!(
            fields = doc.forms.len(),
            forms = forms.len(),
            "generated form html"
        );

        if prelude.is_empty() {
            body
        } else {
            format!("{prelude}\n{body}")
        }
    }
}

struct RenderState<'a> {
    registry: &'a FieldTypeRegistry,
    fields: &'a [Field],
    forms: &'a [FormDeclaration],
    groups: &'a [GroupDeclaration],
    ids: IdAllocator,
}

impl<'a> RenderState<'a> {
    fn substitute(&mut self, caps: &Captures<'_>) -> String {
        let index = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<usize>().ok());
        let fields: &'a [Field] = self.fields;
        let groups: &'a [GroupDeclaration] = self.groups;

        let replacement = if let Some(i) = index("field") {
            fields.get(i).map(|field| self.block(field))
        } else if let Some(i) = index("start") {
            groups.get(i).map(group_open)
        } else if let Some(i) = index("end") {
            groups.get(i).map(|_| "</fieldset>".to_string())
        } else if let Some(i) = index("inline") {
            fields.get(i).map(|field| self.inline(field))
        } else {
            None
        };

        // Unknown indices are left as they were.
        replacement.unwrap_or_else(|| caps[0].to_string())
    }

    fn block(&mut self, field: &'a Field) -> String {
        let form_id = self.form_for(field);
        let id = self.ids.allocate(field.name(), form_id);

        let metadata = RenderMetadata { form_id, id: &id };
        if let Some(html) = self.registry.render(field, &metadata) {
            return html;
        }

        let control = fields::render_control(field, &id, form_id, &mut self.ids);
        if field.is_button() {
            control
        } else {
            fields::wrap_field(field, &control)
        }
    }

    fn inline(&mut self, field: &'a Field) -> String {
        let form_id = self.form_for(field);
        let id = self.ids.allocate(field.name(), form_id);
        fields::render_inline(field, &id, form_id)
    }

    fn form_for(&self, field: &'a Field) -> Option<&'a str> {
        if let Some(form) = field.form_id() {
            return Some(form);
        }
        let forms: &'a [FormDeclaration] = self.forms;
        forms
            .iter()
            .filter_map(|form| form.position.map(|p| (p, form)))
            .filter(|(p, _)| *p <= field.position)
            .max_by_key(|(p, _)| *p)
            .map(|(_, form)| form)
            .or_else(|| forms.first())
            .map(|form| form.id.as_str())
    }
}

fn group_open(group: &GroupDeclaration) -> String {
    let mut out = format!(
        "<fieldset class=\"formdown-group\" data-group=\"{}\"",
        escape_html(&group.id)
    );
    if group.collapsible {
        out.push_str(" data-collapsible=\"true\"");
    }
    if group.collapsed {
        out.push_str(" data-collapsed=\"true\"");
    }
    out.push_str(&format!(">\n<legend>{}</legend>", escape_html(&group.label)));
    out
}
