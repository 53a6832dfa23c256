//! Parser and HTML generator for FormDown
//!
//!     FormDown is markdown with form fields written inline with the prose:
//!
//!         @form[action="/join" method="POST"]
//!         @name*(Full Name): [placeholder="Jane Doe"]
//!         @email*: @[]
//!         I am #___@age[] years old.
//!         @plan{Basic,Pro,*}: r[]
//!         @join: [submit]
//!
//!     This crate turns such text into structured records and into accessible, framework
//!     agnostic HTML. It is a pure library: no printing, no environment, no file IO. The
//!     `formdown` CLI is the shell around it.
//!
//! Architecture
//!
//!     text --parser--> ParsedDocument --generator--> HTML
//!
//!     The parser replaces each recognized construct with an opaque placeholder and
//!     collects the records those placeholders point at. The markdown part is then
//!     rendered by comrak, and the generator swaps placeholders for controls. Fields are
//!     never nested inside `<form>` elements: every control names its form through the
//!     HTML `form` attribute and the forms themselves are emitted as hidden stubs ahead of
//!     the content ("hidden form architecture"). That is what lets fields sit anywhere in
//!     headings, lists, tables or paragraphs.
//!
//!     The file structure:
//!     .
//!     ├── error.rs
//!     ├── escape.rs                # the one HTML escaping routine
//!     ├── extension.rs             # FieldTypeRenderer trait + registry
//!     ├── model.rs                 # Field, FormDeclaration, ... (serde)
//!     ├── schema.rs                # schema projection
//!     ├── syntax                   # single-declaration grammar, no document state
//!     │   ├── attributes.rs
//!     │   ├── field.rs
//!     │   ├── label.rs
//!     │   └── shorthand.rs
//!     ├── parser                   # line scanner, forms, datalists, groups
//!     └── generator                # markdown, placeholders, controls, ids, preludes
//!
//! Error Policy
//!
//!     Documents are edited live, so intermediate states are routinely broken. The main
//!     entry points are therefore total: [`parse_formdown`] and [`generate_form_html`]
//!     never fail. Invalid field names drop the field, unknown form references fall back
//!     to the current form, malformed declarations are logged (`tracing`) and skipped.
//!     Only the legacy [`parse`] is strict about field names.
//!
//! Testing
//!
//!     Unit tests live next to the code. Integration tests are under tests/, gathered by
//!     tests/lib.rs.

pub mod error;
pub mod escape;
pub mod extension;
pub mod generator;
pub mod model;
pub mod parser;
pub mod schema;
pub mod syntax;

pub use error::FormdownError;
pub use extension::{FieldTypeRegistry, FieldTypeRenderer, RenderMetadata};
pub use generator::{wrap_document, GenerateOptions, HtmlGenerator, MarkdownOptions};
pub use model::{
    AttributeValue, Attributes, Condition, ConditionOperator, Conditions, DatalistDeclaration,
    Field, FormDeclaration, GroupDeclaration, LegacyParseResult, ParsedDocument,
};
pub use parser::{DefaultForm, Diagnostic, ParseOutcome, Parser};
pub use schema::{FieldSchema, FieldValidation, Schema};

/// Input accepted by [`generate_form_html`]: raw text or an already parsed document.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    Text(&'a str),
    Parsed(&'a ParsedDocument),
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(text: &'a str) -> Self {
        Source::Text(text)
    }
}

impl<'a> From<&'a String> for Source<'a> {
    fn from(text: &'a String) -> Self {
        Source::Text(text)
    }
}

impl<'a> From<&'a ParsedDocument> for Source<'a> {
    fn from(doc: &'a ParsedDocument) -> Self {
        Source::Parsed(doc)
    }
}

/// Parse a document into placeholder markdown plus fields, forms, datalists and groups.
pub fn parse_formdown(text: &str) -> ParsedDocument {
    Parser::new().parse(text)
}

/// Legacy entry point: fields and diagnostics only, strict about field names.
///
/// Fails with [`FormdownError::InvalidFieldName`] for the first field whose name is
/// empty or starts with a digit, where [`parse_formdown`] would silently drop it.
pub fn parse(text: &str) -> Result<LegacyParseResult, FormdownError> {
    Parser::new().parse_legacy(text)
}

/// Generate HTML from raw text or from a parsed document.
pub fn generate_form_html<'a>(content: impl Into<Source<'a>>) -> String {
    Formdown::new().generate_source(content.into())
}

/// Name-keyed schema of the fields in `text`.
pub fn get_schema(text: &str) -> Schema {
    schema::schema_of(&parse_formdown(text))
}

/// Options shared by the parser and the generator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormdownOptions {
    pub markdown: MarkdownOptions,
    pub default_form: DefaultForm,
}

/// Parse result with recoverable problems and extension validation failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseReport {
    pub document: ParsedDocument,
    pub errors: Vec<String>,
}

/// A configured parser + generator pair sharing one extension registry.
///
/// # Examples
///
/// ```ignore
/// let mut formdown = Formdown::new();
/// formdown.register(StarRating);
/// let html = formdown.render("@rating: [stars max=5]");
/// ```
#[derive(Debug, Default)]
pub struct Formdown {
    parser: Parser,
    generator: HtmlGenerator,
}

impl Formdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: FormdownOptions) -> Self {
        Formdown {
            parser: Parser::with_default_form(options.default_form.clone()),
            generator: HtmlGenerator::with_options(GenerateOptions {
                markdown: options.markdown,
                default_form: options.default_form,
            }),
        }
    }

    pub fn register<R: FieldTypeRenderer + 'static>(&mut self, renderer: R) {
        self.generator.registry_mut().register(renderer);
    }

    pub fn registry(&self) -> &FieldTypeRegistry {
        self.generator.registry()
    }

    pub fn registry_mut(&mut self) -> &mut FieldTypeRegistry {
        self.generator.registry_mut()
    }

    /// Parse and validate. Fields that fail extension validation are kept.
    pub fn parse(&self, text: &str) -> ParseReport {
        let outcome = self.parser.parse_with_diagnostics(text);
        let mut errors: Vec<String> = outcome.diagnostics.iter().map(ToString::to_string).collect();
        errors.extend(
            self.validate(&outcome.document)
                .iter()
                .map(ToString::to_string),
        );
        ParseReport {
            document: outcome.document,
            errors,
        }
    }

    /// Strict parse with this instance's default form. See [`Parser::parse_legacy`].
    pub fn parse_legacy(&self, text: &str) -> Result<LegacyParseResult, FormdownError> {
        self.parser.parse_legacy(text)
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    /// Run each registered renderer's validation over the fields of its type.
    pub fn validate(&self, doc: &ParsedDocument) -> Vec<FormdownError> {
        let errors: Vec<FormdownError> = doc
            .forms
            .iter()
            .filter_map(|field| self.registry().validate(field).err())
            .collect();
        for error in &errors {
            tracing::warn!(%error, "field failed extension validation");
        }
        errors
    }

    pub fn generate(&self, doc: &ParsedDocument) -> String {
        self.generator.generate(doc)
    }

    pub fn render(&self, text: &str) -> String {
        self.generate(&self.parser.parse(text))
    }

    fn generate_source(&self, source: Source<'_>) -> String {
        match source {
            Source::Text(text) => self.render(text),
            Source::Parsed(doc) => self.generate(doc),
        }
    }

    pub fn schema(&self, text: &str) -> Schema {
        schema::schema_of(&self.parser.parse(text))
    }
}
