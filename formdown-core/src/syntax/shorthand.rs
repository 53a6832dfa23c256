//! Field declaration grammar: standard and shorthand dialects
//!
//!     Standard block syntax is `@name(Label): [type attrs]`; standard inline syntax is
//!     `___@name(Label)[type attrs]`. The shorthand dialect layers compact markers on
//!     the same head:
//!
//!     - `*` after the name marks the field required
//!     - `{...}` carries content whose meaning depends on the resolved type
//!     - `(Label)` may appear before or after `*`/`{...}`
//!     - a type sigil directly before `[` (block) or before `___@` (inline)
//!
//!     Matching is total: every matcher returns `None` instead of failing. A declaration
//!     is classified as shorthand only when one of the shorthand-exclusive features
//!     (required marker, content block, type sigil) is present; a bare `(Label)` is part
//!     of the standard grammar too and never flips the classification.

use once_cell::sync::Lazy;
use regex::Regex;

static OTHER_ENTRY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\*\((.*)\)$").unwrap());

/// Which grammar recognized a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxKind {
    Standard,
    Shorthand,
}

/// A type sigil resolved to its field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMarker {
    pub field_type: &'static str,
    /// Row count from `T<digits>`
    pub rows: Option<u32>,
}

/// Shorthand features present on a declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShorthandFeatures {
    pub required: bool,
    pub content: bool,
    pub label: bool,
    pub marker: bool,
    pub rows: bool,
}

impl ShorthandFeatures {
    /// A label alone is shared with the standard grammar and does not count.
    pub fn is_shorthand(&self) -> bool {
        self.required || self.content || self.marker || self.rows
    }
}

/// A recognized but not yet interpreted field declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec<'a> {
    pub kind: SyntaxKind,
    pub name: &'a str,
    pub label: Option<&'a str>,
    pub required: bool,
    pub content: Option<&'a str>,
    pub marker: Option<TypeMarker>,
    /// Bracket interior, possibly empty
    pub body: &'a str,
}

/// An inline declaration located inside a line of prose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineMatch<'a> {
    /// Byte range in the line, sigil included
    pub start: usize,
    pub end: usize,
    pub spec: FieldSpec<'a>,
}

/// What a `{...}` content block turns into once the field type is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentEffect {
    Options {
        options: Vec<String>,
        allow_other: bool,
        other_label: Option<String>,
    },
    Format(String),
    Pattern(String),
    Datalist(Vec<String>),
}

/// Resolve a type sigil.
pub fn resolve_marker(marker: &str) -> Option<TypeMarker> {
    let field_type = match marker {
        "@" => "email",
        "#" => "number",
        "%" => "tel",
        "&" => "url",
        "d" => "date",
        "t" => "time",
        "dt" => "datetime-local",
        "?" => "password",
        "T" => "textarea",
        "r" => "radio",
        "s" => "select",
        "c" => "checkbox",
        "R" => "range",
        "F" => "file",
        "C" => "color",
        "M" => "month",
        "W" => "week",
        other => {
            let digits = other.strip_prefix('T')?;
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            return Some(TypeMarker {
                field_type: "textarea",
                rows: digits.parse().ok(),
            });
        }
    };
    Some(TypeMarker {
        field_type,
        rows: None,
    })
}

/// Match a whole line as a block field declaration.
pub fn match_block_field(line: &str) -> Option<FieldSpec<'_>> {
    let trimmed = line.trim();
    let after_at = trimmed.strip_prefix('@')?;
    let head = parse_head(after_at)?;

    let rest = head.rest.trim_start().strip_prefix(':')?.trim_start();
    let bracket = rest.find('[')?;
    let (marker_text, bracketed) = rest.split_at(bracket);
    let (body, tail) = take_bracket(bracketed)?;
    if !tail.trim().is_empty() {
        return None;
    }

    let marker = if marker_text.is_empty() {
        None
    } else {
        Some(resolve_marker(marker_text)?)
    };

    Some(head.into_spec(marker, body))
}

/// Find every `___@` declaration in a line of prose, left to right.
pub fn find_inline_fields(line: &str) -> Vec<InlineMatch<'_>> {
    let mut matches = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = line[cursor..].find("___@") {
        let delimiter = cursor + offset;
        let name_start = delimiter + 4;

        let Some(head) = parse_head(&line[name_start..]) else {
            cursor = name_start;
            continue;
        };

        let (body, tail) = match take_bracket(head.rest) {
            Some((body, tail)) => (body, tail),
            None => ("", head.rest),
        };
        let end = line.len() - tail.len();

        let (start, marker) = match inline_sigil(line, delimiter, cursor) {
            Some((sigil_start, marker)) => (sigil_start, Some(marker)),
            None => (delimiter, None),
        };

        matches.push(InlineMatch {
            start,
            end,
            spec: head.into_spec(marker, body),
        });
        cursor = end;
    }

    matches
}

/// Interpret `{...}` content for a field of `field_type`.
pub fn interpret_content(field_type: &str, content: &str) -> ContentEffect {
    match field_type {
        "radio" | "select" | "checkbox" => {
            let (options, allow_other, other_label) = extract_other_option(split_options(content));
            ContentEffect::Options {
                options,
                allow_other,
                other_label,
            }
        }
        "date" | "time" | "datetime-local" => ContentEffect::Format(content.to_string()),
        _ if is_suggestion_list(content) => ContentEffect::Datalist(split_options(content)),
        _ => ContentEffect::Pattern(content_to_pattern(content)),
    }
}

/// Split a comma-separated option list, trimming entries and dropping empty ones.
pub fn split_options(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Pull `*` / `*(Label)` entries out of an option list.
///
/// Returns the remaining options, whether a write-in option was requested, and the
/// label of the first such entry (later entries are removed but their labels ignored).
pub fn extract_other_option(entries: Vec<String>) -> (Vec<String>, bool, Option<String>) {
    let mut options = Vec::with_capacity(entries.len());
    let mut allow_other = false;
    let mut other_label = None;

    for entry in entries {
        let label = if entry == "*" {
            Some(None)
        } else {
            OTHER_ENTRY
                .captures(&entry)
                .map(|caps| Some(caps[1].trim().to_string()))
        };
        match label {
            Some(label) => {
                if !allow_other {
                    other_label = label.filter(|l| !l.is_empty());
                }
                allow_other = true;
            }
            None => options.push(entry),
        }
    }

    (options, allow_other, other_label)
}

/// Convert content into an HTML `pattern`.
///
/// Unanchored content containing `#` is a mask and unanchored content with `*` is
/// a glob; both become an anchored regex. Anything else is already a regex.
pub fn content_to_pattern(content: &str) -> String {
    let anchored = content.starts_with('^') || content.ends_with('$');
    if !anchored && (content.contains('#') || content.contains('*')) {
        mask_to_regex(content)
    } else {
        content.to_string()
    }
}

fn mask_to_regex(mask: &str) -> String {
    let mut out = String::from("^");
    let mut chars = mask.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '#' => {
                let mut run = 1;
                while chars.next_if_eq(&'#').is_some() {
                    run += 1;
                }
                out.push_str(&format!("\\d{{{run}}}"));
            }
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '(' | ')' | '.' | '/' | '-' | '\\' | '^' | '$' | '|' | '+' | '[' | ']' | '{'
            | '}' => {
                out.push('\\');
                out.push(ch);
            }
            other => out.push(other),
        }
    }
    out.push('$');
    out
}

/// Comma-separated plain words with no mask or regex syntax.
fn is_suggestion_list(content: &str) -> bool {
    const SYNTAX: &[char] = &[
        '#', '*', '?', '^', '$', '\\', '[', ']', '(', ')', '{', '}', '+', '|',
    ];
    content.contains(',') && !content.contains(SYNTAX)
}

struct Head<'a> {
    name: &'a str,
    label: Option<&'a str>,
    required: bool,
    content: Option<&'a str>,
    rest: &'a str,
}

impl<'a> Head<'a> {
    fn into_spec(self, marker: Option<TypeMarker>, body: &'a str) -> FieldSpec<'a> {
        let features = ShorthandFeatures {
            required: self.required,
            content: self.content.is_some(),
            label: self.label.is_some(),
            marker: marker.is_some(),
            rows: marker.is_some_and(|m| m.rows.is_some()),
        };
        let kind = if features.is_shorthand() {
            SyntaxKind::Shorthand
        } else {
            SyntaxKind::Standard
        };
        FieldSpec {
            kind,
            name: self.name,
            label: self.label,
            required: self.required,
            content: self.content,
            marker,
            body,
        }
    }
}

/// Read `name` followed by `*`, `(Label)` and `{content}` in any order, each at
/// most once.
fn parse_head(input: &str) -> Option<Head<'_>> {
    let name_len = input
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(input.len());
    if name_len == 0 {
        return None;
    }
    let name = &input[..name_len];
    let mut rest = &input[name_len..];

    let mut required = false;
    let mut label = None;
    let mut content = None;

    loop {
        if let Some(after) = rest.strip_prefix('*') {
            if required {
                break;
            }
            required = true;
            rest = after;
        } else if rest.starts_with('(') {
            if label.is_some() {
                break;
            }
            let (inner, after) = take_balanced(rest, '(', ')')?;
            label = Some(inner);
            rest = after;
        } else if rest.starts_with('{') {
            if content.is_some() {
                break;
            }
            let (inner, after) = take_balanced(rest, '{', '}')?;
            content = Some(inner);
            rest = after;
        } else {
            break;
        }
    }

    Some(Head {
        name,
        label,
        required,
        content,
        rest,
    })
}

/// Split a delimited group with nesting, e.g. `{...}` holding `\d{5}` or a label `(Phone (mobile))`.
fn take_balanced(input: &str, open: char, close: char) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (idx, ch) in input.char_indices() {
        match ch {
            c if c == open => depth += 1,
            c if c == close => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some((&input[1..idx], &input[idx + 1..]));
                }
            }
            _ => {}
        }
    }
    None
}

/// Split `[...]` where `]` inside quotes does not close the bracket.
pub fn take_bracket(input: &str) -> Option<(&str, &str)> {
    let body = input.strip_prefix('[')?;
    let mut quote: Option<char> = None;
    for (idx, ch) in body.char_indices() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None if ch == '"' || ch == '\'' => quote = Some(ch),
            None if ch == ']' => return Some((&body[..idx], &body[idx + 1..])),
            None => {}
        }
    }
    None
}

/// Detect a type sigil written directly before `___@`, e.g. `@___@contact[]`.
///
/// The sigil must itself start a word so prose such as `and___@x` is not misread.
fn inline_sigil(line: &str, delimiter: usize, floor: usize) -> Option<(usize, TypeMarker)> {
    let before = &line[floor..delimiter];
    for width in [2, 1] {
        if before.len() < width || !before.is_char_boundary(before.len() - width) {
            continue;
        }
        let sigil_start = before.len() - width;
        let sigil = &before[sigil_start..];
        let Some(marker) = resolve_marker(sigil) else {
            continue;
        };
        let starts_word = before[..sigil_start]
            .chars()
            .next_back()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '_'));
        if starts_word {
            return Some((floor + sigil_start, marker));
        }
    }
    None
}
