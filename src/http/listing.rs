//! Directory listing page

use std::fmt::Write;

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
}

/// Render the HTML index page for a directory
///
/// `request_path` is the decoded URL path, shown in the title.
pub fn render_listing(request_path: &str, entries: &[ListingEntry]) -> String {
    let mut sorted: Vec<&ListingEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.name.to_lowercase());

    let title = format!("Directory listing for {}", escape_html(request_path));
    let mut html = String::new();
    html.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{title}</title>");
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<h1>{title}</h1>");
    html.push_str("<hr>\n<ul>\n");

    for entry in sorted {
        let mut href = urlencoding::encode(&entry.name).into_owned();
        if entry.is_dir {
            href.push('/');
        }
        // Symlinks are marked with '@' instead of the directory slash
        let display = match (entry.is_symlink, entry.is_dir) {
            (true, _) => format!("{}@", entry.name),
            (false, true) => format!("{}/", entry.name),
            (false, false) => entry.name.clone(),
        };
        let _ = writeln!(
            html,
            "<li><a href=\"{href}\">{}</a></li>",
            escape_html(&display)
        );
    }

    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

/// Escape text for HTML element and attribute content
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
