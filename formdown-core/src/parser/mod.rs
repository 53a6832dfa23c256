//! FormDown extraction
//!
//!     The parser walks the document line by line and splits it into two outputs:
//!     markdown in which every recognized construct is replaced by a placeholder, and
//!     the structured records those placeholders point at.
//!
//!     Per line, the first matcher that accepts wins:
//!
//!     1. `@form[...]`            -> form declaration, line removed
//!     2. `@datalist[...]`/`@#id:` -> datalist declaration, line removed (also when invalid)
//!     3. `## [Label]`            -> group start (closing any open group)
//!     4. `#`/`##` heading        -> closes the open group, heading kept
//!     5. block field             -> `<!--FORMDOWN_FIELD_{n}-->`
//!     6. inline fields           -> `<span data-formdown-inline="{n}" ...></span>` in place
//!
//!     Lines inside fenced or indented code blocks are never interpreted. `n` is the field's index
//!     in the document-wide field list, so placeholders stay stable however the
//!     markdown renderer moves them around.
//!
//!     Parsing is total: anything unrecognized is markdown, invalid field names drop
//!     the field, and bad references degrade to the fallback form. Problems are
//!     recorded as [`Diagnostic`]s.

mod code;
pub mod context;
pub mod datalist;
pub mod forms;
pub mod groups;

pub use context::{Diagnostic, ParseContext};
pub use forms::{DefaultForm, DEFAULT_FORM_ID};

use crate::error::FormdownError;
use crate::escape::escape_html;
use crate::model::{AttributeValue, Field, LegacyParseResult, ParsedDocument};
use crate::syntax::field::{build_field, FieldDraft};
use crate::syntax::shorthand::{find_inline_fields, match_block_field, FieldSpec};
use code::CodeTracker;
use datalist::match_datalist;
use forms::match_form_declaration;
use groups::{is_closing_heading, match_group_heading};

pub fn field_placeholder(index: usize) -> String {
    format!("<!--FORMDOWN_FIELD_{index}-->")
}

/// Everything a parse produced, including what the lenient API hides.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub document: ParsedDocument,
    pub diagnostics: Vec<Diagnostic>,
    /// Names of fields dropped for being invalid
    pub rejected_names: Vec<String>,
}

/// Document parser. Holds configuration only; every call starts from fresh state.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    default_form: DefaultForm,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_form(default_form: DefaultForm) -> Self {
        Parser { default_form }
    }

    pub fn default_form(&self) -> &DefaultForm {
        &self.default_form
    }

    /// Lenient parse: never fails.
    pub fn parse(&self, text: &str) -> ParsedDocument {
        self.parse_with_diagnostics(text).document
    }

    /// Strict parse kept for older callers: fails on the first invalid field name
    /// and reports recoverable problems as strings.
    pub fn parse_legacy(&self, text: &str) -> Result<LegacyParseResult, FormdownError> {
        let outcome = self.parse_with_diagnostics(text);
        if let Some(name) = outcome.rejected_names.into_iter().next() {
            return Err(FormdownError::InvalidFieldName(name));
        }
        Ok(LegacyParseResult {
            fields: outcome.document.forms,
            errors: outcome
                .diagnostics
                .iter()
                .map(ToString::to_string)
                .collect(),
        })
    }

    pub fn parse_with_diagnostics(&self, text: &str) -> ParseOutcome {
        let mut ctx = ParseContext::new(&self.default_form);
        let mut output: Vec<String> = Vec::new();
        let mut code = CodeTracker::default();

        for (index, line) in text.split('\n').enumerate() {
            ctx.line = index;
            if code.is_code(line) {
                output.push(line.to_string());
                continue;
            }
            output.push(process_line(&mut ctx, line));
        }

        if let Some(marker) = ctx.close_group() {
            output.push(marker);
        }

        tracing::debug!(
            fields = ctx.fields.len(),
            forms = ctx.forms.len(),
            datalists = ctx.datalists.len(),
            groups = ctx.groups.len(),
            "parsed formdown document"
        );

        ParseOutcome {
            document: ParsedDocument {
                markdown: output.join("\n"),
                forms: ctx.fields,
                form_declarations: ctx.forms,
                datalist_declarations: ctx.datalists,
                group_declarations: ctx.groups,
            },
            diagnostics: ctx.diagnostics,
            rejected_names: ctx.rejected_names,
        }
    }
}

fn process_line(ctx: &mut ParseContext<'_>, line: &str) -> String {
    if let Some(attributes) = match_form_declaration(line) {
        ctx.declare_form(attributes);
        return String::new();
    }

    if let Some(datalist) = match_datalist(line) {
        ctx.declare_datalist(datalist);
        return String::new();
    }

    if let Some(heading) = match_group_heading(line) {
        return ctx.open_group(heading).join("\n");
    }

    if is_closing_heading(line) {
        let marker = ctx.close_group();
        let heading = replace_inline_fields(ctx, line);
        return match marker {
            Some(marker) => format!("{marker}\n{heading}"),
            None => heading,
        };
    }

    if let Some(spec) = match_block_field(line) {
        return match extract_field(ctx, &spec, false) {
            Some(index) => field_placeholder(index),
            None => String::new(),
        };
    }

    replace_inline_fields(ctx, line)
}

fn replace_inline_fields(ctx: &mut ParseContext<'_>, line: &str) -> String {
    let matches = find_inline_fields(line);
    if matches.is_empty() {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len());
    let mut last = 0;
    for found in matches {
        out.push_str(&line[last..found.start]);
        if let Some(index) = extract_field(ctx, &found.spec, true) {
            out.push_str(&inline_placeholder(index, &ctx.fields[index]));
        }
        last = found.end;
    }
    out.push_str(&line[last..]);
    out
}

/// Build, associate and store one field. `None` when the declaration was dropped.
fn extract_field(ctx: &mut ParseContext<'_>, spec: &FieldSpec<'_>, inline: bool) -> Option<usize> {
    let FieldDraft {
        mut field,
        suggestions,
    } = match build_field(spec, inline) {
        Ok(draft) => draft,
        Err(err) => {
            tracing::debug!(line = ctx.line + 1, "{err}; field skipped");
            ctx.rejected_names.push(spec.name.to_string());
            return None;
        }
    };

    if let Some(options) = suggestions {
        if !field.attributes.contains_key("list") {
            let id = ctx.implicit_datalist(options);
            field
                .attributes
                .insert("list".to_string(), AttributeValue::String(id));
        }
    }

    ctx.associate(&mut field);
    Some(ctx.push_field(field))
}

fn inline_placeholder(index: usize, field: &Field) -> String {
    let placeholder = field.placeholder.as_deref().unwrap_or(&field.label);
    let mut span = format!(
        r#"<span data-formdown-inline="{index}" data-field-name="{}" data-field-type="{}" data-placeholder="{}""#,
        escape_html(field.name()),
        escape_html(&field.field_type),
        escape_html(placeholder),
    );
    if field.required {
        span.push_str(r#" data-required="true""#);
    }
    span.push_str("></span>");
    span
}
