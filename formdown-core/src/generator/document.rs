//! Standalone HTML5 page wrapper

use crate::escape::escape_html;

/// Wrap a generated fragment in a minimal HTML5 document.
pub fn wrap_document(body: &str, title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body.trim_end()
    )
}
