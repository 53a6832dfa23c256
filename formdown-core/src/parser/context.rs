//! Per-call parse state
//!
//! A fresh [`ParseContext`] is created for every parse, so counters and lookup sets
//! never leak between documents.

use crate::model::{DatalistDeclaration, Field, FormDeclaration, GroupDeclaration};
use crate::parser::forms::DefaultForm;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A recoverable problem found while parsing. Parsing always continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 0-based line index
    pub line: usize,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line + 1, self.message)
    }
}

pub struct ParseContext<'a> {
    pub(crate) default_form: &'a DefaultForm,
    pub(crate) fields: Vec<Field>,
    pub(crate) forms: Vec<FormDeclaration>,
    pub(crate) current_form: Option<String>,
    pub(crate) form_counter: usize,
    pub(crate) default_form_created: bool,
    pub(crate) datalists: Vec<DatalistDeclaration>,
    /// Content-addressed implicit datalists: option list -> id
    pub(crate) implicit_datalists: HashMap<Vec<String>, String>,
    pub(crate) datalist_counter: usize,
    pub(crate) groups: Vec<GroupDeclaration>,
    /// Index into `groups` of the group currently collecting fields
    pub(crate) open_group: Option<usize>,
    pub(crate) group_ids: HashSet<String>,
    pub(crate) diagnostics: Vec<Diagnostic>,
    /// Names of fields dropped for being invalid, in document order
    pub(crate) rejected_names: Vec<String>,
    pub(crate) line: usize,
}

impl<'a> ParseContext<'a> {
    pub fn new(default_form: &'a DefaultForm) -> Self {
        ParseContext {
            default_form,
            fields: Vec::new(),
            forms: Vec::new(),
            current_form: None,
            form_counter: 1,
            default_form_created: false,
            datalists: Vec::new(),
            implicit_datalists: HashMap::new(),
            datalist_counter: 1,
            groups: Vec::new(),
            open_group: None,
            group_ids: HashSet::new(),
            diagnostics: Vec::new(),
            rejected_names: Vec::new(),
            line: 0,
        }
    }

    pub(crate) fn diagnose(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            line: self.line,
            message: message.into(),
        });
    }

    /// Append a field, returning its index in the document's field list.
    pub(crate) fn push_field(&mut self, mut field: Field) -> usize {
        field.position = self.line;
        if let Some(group) = self.open_group {
            field.group = Some(self.groups[group].id.clone());
        }
        self.fields.push(field);
        self.fields.len() - 1
    }
}
