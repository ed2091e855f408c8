//! Static file serving module
//!
//! Maps request paths onto files below the root directory: file contents,
//! index files, directory listings and `If-Modified-Since` revalidation.

use crate::http::{self, cache, listing, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;

/// Request details the file responder needs
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Request path, still percent-encoded, without query
    pub path: String,
    pub query: Option<String>,
    pub is_head: bool,
    pub if_modified_since: Option<String>,
    /// `If-None-Match` takes precedence; its presence disables date revalidation
    pub has_if_none_match: bool,
}

/// Serve a GET/HEAD request from `root`
pub async fn serve(
    ctx: &RequestContext,
    root: &Path,
    index_files: &[String],
) -> Response<Full<Bytes>> {
    let Some(candidate) = resolve_path(root, &ctx.path) else {
        return http::build_404_response();
    };

    let root_canonical = match root.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Root directory not found or inaccessible '{}': {e}",
                root.display()
            ));
            return http::build_404_response();
        }
    };

    let Some(target) = contained_path(&root_canonical, &candidate, &ctx.path) else {
        return http::build_404_response();
    };

    if target.is_dir() {
        if !ctx.path.ends_with('/') {
            let location = redirect_location(&ctx.path, ctx.query.as_deref());
            return http::build_301_response(&location);
        }

        for index_file in index_files {
            let index_path = target.join(index_file);
            if !index_path.is_file() {
                continue;
            }
            if let Some(index_path) = contained_path(&root_canonical, &index_path, &ctx.path) {
                return serve_file(ctx, &index_path).await;
            }
        }

        return serve_listing(ctx, &target).await;
    }

    // A trailing slash only makes sense for directories
    if ctx.path.ends_with('/') {
        return http::build_404_response();
    }

    serve_file(ctx, &target).await
}

/// Translate a URL path into a filesystem path below `root`
///
/// Empty, `.` and `..` segments are dropped, so the result never walks
/// above `root` lexically. Returns `None` if the path does not decode.
pub fn resolve_path(root: &Path, url_path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(url_path).ok()?;
    let mut path = root.to_path_buf();
    for segment in decoded.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." || segment.contains('\\') {
            continue;
        }
        path.push(segment);
    }
    Some(path)
}

/// Location for the trailing-slash redirect of a directory
///
/// Leading slashes collapse to one: `//host/` would be read by browsers as
/// a network-path reference to another host.
pub fn redirect_location(path: &str, query: Option<&str>) -> String {
    let path = format!("/{}/", path.trim_start_matches('/'));
    match query {
        Some(q) => format!("{path}?{q}"),
        None => path,
    }
}

/// Canonicalize `path` and make sure it is still inside the root (symlinks included)
fn contained_path(root_canonical: &Path, path: &Path, request_path: &str) -> Option<PathBuf> {
    // Missing files are the common 404 case, not worth a warning
    let canonical = path.canonicalize().ok()?;
    if canonical.starts_with(root_canonical) {
        Some(canonical)
    } else {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {request_path} -> {}",
            canonical.display()
        ));
        None
    }
}

async fn serve_file(ctx: &RequestContext, file_path: &Path) -> Response<Full<Bytes>> {
    let metadata = match fs::metadata(file_path).await {
        Ok(m) => m,
        Err(_) => return http::build_404_response(),
    };
    let last_modified = metadata.modified().unwrap_or_else(|_| SystemTime::now());
    let last_modified_header = cache::format_http_date(last_modified);

    if !ctx.has_if_none_match
        && cache::is_not_modified(ctx.if_modified_since.as_deref(), last_modified)
    {
        return http::build_304_response(&last_modified_header);
    }

    let content = match fs::read(file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_path.display()
            ));
            return http::build_404_response();
        }
    };

    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
    http::build_file_response(
        Bytes::from(content),
        content_type,
        &last_modified_header,
        ctx.is_head,
    )
}

async fn serve_listing(ctx: &RequestContext, dir: &Path) -> Response<Full<Bytes>> {
    let entries = match read_entries(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            logger::log_warning(&format!(
                "No permission to list directory '{}': {e}",
                dir.display()
            ));
            return http::build_404_response();
        }
    };

    let display_path = urlencoding::decode(&ctx.path)
        .map_or_else(|_| ctx.path.clone(), std::borrow::Cow::into_owned);
    http::build_html_response(listing::render_listing(&display_path, &entries), ctx.is_head)
}

async fn read_entries(dir: &Path) -> io::Result<Vec<listing::ListingEntry>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        let is_symlink = entry.file_type().await?.is_symlink();
        // Follows symlinks, so linked directories are listed as directories
        let is_dir = fs::metadata(entry.path()).await.is_ok_and(|m| m.is_dir());
        entries.push(listing::ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
            is_symlink,
        });
    }
    Ok(entries)
}
