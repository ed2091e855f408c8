//! MIME type detection module
//!
//! Returns the corresponding Content-Type based on file extension.

/// Get MIME Content-Type based on file extension (case-insensitive)
///
/// # Examples
/// ```
/// use cors_devserver::http::mime::get_content_type;
/// assert_eq!(get_content_type(Some("html")), "text/html; charset=utf-8");
/// assert_eq!(get_content_type(Some("JS")), "text/javascript");
/// assert_eq!(get_content_type(None), "application/octet-stream");
/// ```
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    let Some(ext) = extension else {
        return "application/octet-stream";
    };

    match ext.to_ascii_lowercase().as_str() {
        // Documents served to the browser
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css",
        "txt" | "md" | "log" => "text/plain; charset=utf-8",
        "csv" => "text/csv",
        "xml" => "application/xml",

        // Scripts and extension metadata
        "js" | "mjs" => "text/javascript",
        "json" | "map" => "application/json",
        "webmanifest" => "application/manifest+json",
        "wasm" => "application/wasm",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",

        // Media
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",

        // Fonts
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",

        // Archives (packed extensions)
        "pdf" => "application/pdf",
        "zip" | "crx" => "application/zip",

        _ => "application/octet-stream",
    }
}
