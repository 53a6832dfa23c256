//! Code regions that are never scanned for FormDown syntax
//!
//!     Fenced blocks close only on a fence of the same character that is at least
//!     as long as the opener. Indented code starts after a blank line (or at the
//!     top of the document) with four or more columns of indentation, except
//!     inside a list where such lines are item continuations.

use once_cell::sync::Lazy;
use regex::Regex;

static LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ {0,3}([-+*]|\d{1,9}[.)])(\s|$)").unwrap());

#[derive(Debug)]
pub(crate) struct CodeTracker {
    fence: Option<(char, usize)>,
    indented: bool,
    in_list: bool,
    previous_blank: bool,
}

impl Default for CodeTracker {
    fn default() -> Self {
        CodeTracker {
            fence: None,
            indented: false,
            in_list: false,
            previous_blank: true,
        }
    }
}

impl CodeTracker {
    /// Whether `line` belongs to a code region. Lines must be fed in order.
    pub(crate) fn is_code(&mut self, line: &str) -> bool {
        if let Some((marker, len)) = self.fence {
            if closes_fence(line, marker, len) {
                self.fence = None;
                self.previous_blank = false;
            }
            return true;
        }
        if let Some(fence) = opening_fence(line) {
            self.fence = Some(fence);
            self.indented = false;
            return true;
        }

        if line.trim().is_empty() {
            self.previous_blank = true;
            return self.indented;
        }

        let indent = indent_width(line);
        if indent >= 4 && !self.in_list && (self.previous_blank || self.indented) {
            self.indented = true;
            self.previous_blank = false;
            return true;
        }

        self.indented = false;
        self.previous_blank = false;
        if LIST_ITEM.is_match(line) {
            self.in_list = true;
        } else if indent == 0 {
            self.in_list = false;
        }
        false
    }
}

/// Columns of leading whitespace, with tabs stopping at multiples of four.
fn indent_width(line: &str) -> usize {
    let mut width = 0;
    for ch in line.chars() {
        match ch {
            ' ' => width += 1,
            '\t' => width += 4 - width % 4,
            _ => break,
        }
    }
    width
}

fn fence_run(line: &str) -> Option<(char, usize, &str)> {
    if indent_width(line) > 3 {
        return None;
    }
    let trimmed = line.trim_start();
    let marker = trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))?;
    let len = trimmed.chars().take_while(|c| *c == marker).count();
    Some((marker, len, &trimmed[len..]))
}

fn opening_fence(line: &str) -> Option<(char, usize)> {
    let (marker, len, info) = fence_run(line)?;
    if len < 3 || (marker == '`' && info.contains('`')) {
        return None;
    }
    Some((marker, len))
}

fn closes_fence(line: &str, marker: char, open_len: usize) -> bool {
    matches!(
        fence_run(line),
        Some((m, len, rest)) if m == marker && len >= open_len && rest.trim().is_empty()
    )
}
