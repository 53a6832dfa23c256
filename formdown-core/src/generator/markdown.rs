//! Markdown rendering through comrak
//!
//! Placeholders are HTML comments (block fields, groups) or raw `<span>`s (inline
//! fields), so raw HTML passthrough is always on; the extension flags are
//! configurable.

use comrak::{markdown_to_html, ComrakOptions};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownOptions {
    pub table: bool,
    pub strikethrough: bool,
    pub autolink: bool,
    pub tasklist: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        MarkdownOptions {
            table: true,
            strikethrough: true,
            autolink: true,
            tasklist: true,
        }
    }
}

fn comrak_options(options: &MarkdownOptions) -> ComrakOptions<'static> {
    let mut comrak = ComrakOptions::default();
    comrak.extension.table = options.table;
    comrak.extension.strikethrough = options.strikethrough;
    comrak.extension.autolink = options.autolink;
    comrak.extension.tasklist = options.tasklist;
    comrak.render.unsafe_ = true;
    comrak
}

pub fn render_markdown(markdown: &str, options: &MarkdownOptions) -> String {
    markdown_to_html(markdown, &comrak_options(options))
}
