//! HTML escaping
//!
//! Every piece of author-controlled text (labels, option values, group legends,
//! datalist entries, textarea defaults, attribute values) passes through
//! [`escape_html`] before it is written into generated markup.

/// Escape the five HTML-significant characters: `& < > " '`.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
