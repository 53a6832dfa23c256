//! `## [Label]` fieldset groups
//!
//! A group stays open until the next group heading, a plain `#`/`##` heading, or the
//! end of the document. Deeper headings (`###`) are sub-sections and do not close it.

use crate::model::GroupDeclaration;
use crate::parser::context::ParseContext;
use once_cell::sync::Lazy;
use regex::Regex;

pub const GROUP_ID_PREFIX: &str = "formdown-group-";

static GROUP_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^##\s+\[([^\]]*)\]\s*$").unwrap());
static CLOSING_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,2}(\s|$)").unwrap());

pub fn group_start_marker(index: usize) -> String {
    format!("<!--FORMDOWN_GROUP_START_{index}-->")
}

pub fn group_end_marker(index: usize) -> String {
    format!("<!--FORMDOWN_GROUP_END_{index}-->")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupHeading {
    pub label: String,
    pub collapsible: bool,
    pub collapsed: bool,
}

/// Match `## [Label]`, `## [Label collapsible]` or `## [Label collapsed]`.
pub fn match_group_heading(line: &str) -> Option<GroupHeading> {
    let caps = GROUP_HEADING.captures(line.trim())?;
    let mut words: Vec<&str> = caps[1].split_whitespace().collect();

    let mut collapsible = false;
    let mut collapsed = false;
    while let Some(last) = words.last() {
        match *last {
            "collapsible" => collapsible = true,
            "collapsed" => collapsed = true,
            _ => break,
        }
        words.pop();
    }

    if words.is_empty() {
        return None;
    }
    Some(GroupHeading {
        label: words.join(" "),
        // a collapsed group is necessarily collapsible
        collapsible: collapsible || collapsed,
        collapsed,
    })
}

/// A top- or second-level heading that is not a group heading.
pub fn is_closing_heading(line: &str) -> bool {
    CLOSING_HEADING.is_match(line.trim_start())
}

/// Lowercase, alphanumerics kept, every other run collapsed to one `-`.
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    for ch in label.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            slug.push(ch);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let trimmed = slug.trim_end_matches('-');
    if trimmed.is_empty() {
        "group".to_string()
    } else {
        trimmed.to_string()
    }
}

impl ParseContext<'_> {
    /// Open a new group, closing the current one. Returns the markers to emit.
    pub(crate) fn open_group(&mut self, heading: GroupHeading) -> Vec<String> {
        let mut markers: Vec<String> = self.close_group().into_iter().collect();

        let base = format!("{GROUP_ID_PREFIX}{}", slugify(&heading.label));
        let mut id = base.clone();
        let mut n = 2;
        while self.group_ids.contains(&id) {
            id = format!("{base}-{n}");
            n += 1;
        }
        self.group_ids.insert(id.clone());

        self.groups.push(GroupDeclaration {
            id,
            label: heading.label,
            collapsible: heading.collapsible,
            collapsed: heading.collapsed,
        });
        let index = self.groups.len() - 1;
        self.open_group = Some(index);
        markers.push(group_start_marker(index));
        markers
    }

    /// Close the open group, if any, returning its end marker.
    pub(crate) fn close_group(&mut self) -> Option<String> {
        self.open_group.take().map(group_end_marker)
    }
}
