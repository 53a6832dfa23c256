//! Datalist declarations
//!
//! Explicit: `@datalist[id="cities" options="Seoul,Tokyo"]`
//! Shorthand: `@#cities: Seoul, Tokyo`
//! Implicit: `@city{Seoul,Tokyo}: [text]`, content-addressed per document

use crate::model::DatalistDeclaration;
use crate::parser::context::ParseContext;
use crate::syntax::attributes::parse_attributes;
use crate::syntax::shorthand::{split_options, take_bracket};

/// Prefix of implicit datalist ids.
pub const DATALIST_ID_PREFIX: &str = "formdown-datalist-";

/// A line that claims to be a datalist declaration, valid or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatalistLine {
    Valid(DatalistDeclaration),
    Invalid(String),
}

/// Recognize a datalist line. `None` means the line is something else.
pub fn match_datalist(line: &str) -> Option<DatalistLine> {
    let trimmed = line.trim();

    if let Some(rest) = trimmed.strip_prefix("@datalist") {
        let Some((body, tail)) = take_bracket(rest) else {
            return rest
                .starts_with('[')
                .then(|| DatalistLine::Invalid("unterminated @datalist declaration".into()));
        };
        if !tail.trim().is_empty() {
            return None;
        }
        let attrs = parse_attributes(body);
        let id = attrs.get("id").map(|v| v.to_string()).unwrap_or_default();
        let options = attrs
            .get("options")
            .map(|v| split_options(&v.to_string()))
            .unwrap_or_default();
        return Some(validate(id.trim(), options));
    }

    let rest = trimmed.strip_prefix("@#")?;
    let (id, options) = rest.split_once(':')?;
    if id.contains(char::is_whitespace) {
        return None;
    }
    Some(validate(id, split_options(options)))
}

fn validate(id: &str, options: Vec<String>) -> DatalistLine {
    if id.is_empty() {
        DatalistLine::Invalid("datalist declaration is missing an id".into())
    } else if options.is_empty() {
        DatalistLine::Invalid(format!("datalist '{id}' has no options"))
    } else {
        DatalistLine::Valid(DatalistDeclaration {
            id: id.to_string(),
            options,
        })
    }
}

impl ParseContext<'_> {
    pub(crate) fn declare_datalist(&mut self, line: DatalistLine) {
        match line {
            DatalistLine::Valid(datalist) => {
                if self.datalists.iter().any(|d| d.id == datalist.id) {
                    tracing::warn!(datalist = %datalist.id, "duplicate datalist id; keeping the first");
                    self.diagnose(format!("duplicate datalist '{}' ignored", datalist.id));
                } else {
                    self.datalists.push(datalist);
                }
            }
            DatalistLine::Invalid(message) => {
                tracing::warn!(line = self.line + 1, "{message}; declaration dropped");
                self.diagnose(message);
            }
        }
    }

    /// Id of the implicit datalist holding exactly `options`, creating it if needed.
    pub(crate) fn implicit_datalist(&mut self, options: Vec<String>) -> String {
        if let Some(id) = self.implicit_datalists.get(&options) {
            return id.clone();
        }
        let id = loop {
            let candidate = format!("{DATALIST_ID_PREFIX}{}", self.datalist_counter);
            self.datalist_counter += 1;
            if !self.datalists.iter().any(|d| d.id == candidate) {
                break candidate;
            }
        };
        self.datalists.push(DatalistDeclaration {
            id: id.clone(),
            options: options.clone(),
        });
        self.implicit_datalists.insert(options, id.clone());
        id
    }
}
