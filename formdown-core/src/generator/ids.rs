//! Unique element ids within one generated document

use crate::parser::forms::FORM_ID_PREFIX;
use std::collections::HashSet;

/// Hands out ids that are unique across one generated document.
///
/// Candidates, in order: the bare base (`email`), the base scoped by the form
/// (`contact_email` for form `contact`, `1_email` for `formdown-form-1`), then the
/// scoped name with a counter (`contact_email_1`, `contact_email_2`, ...).
#[derive(Debug, Default)]
pub struct IdAllocator {
    used: HashSet<String>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an id as taken without allocating it (form and datalist ids).
    pub fn reserve(&mut self, id: &str) {
        self.used.insert(id.to_string());
    }

    pub fn contains(&self, id: &str) -> bool {
        self.used.contains(id)
    }

    pub fn allocate(&mut self, base: &str, form_id: Option<&str>) -> String {
        if self.used.insert(base.to_string()) {
            return base.to_string();
        }

        let scoped = match form_id {
            Some(form) => {
                let short = form.strip_prefix(FORM_ID_PREFIX).unwrap_or(form);
                format!("{short}_{base}")
            }
            None => base.to_string(),
        };
        if self.used.insert(scoped.clone()) {
            return scoped;
        }

        let mut n = 1;
        loop {
            let candidate = format!("{scoped}_{n}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    pub fn reset(&mut self) {
        self.used.clear();
    }
}
