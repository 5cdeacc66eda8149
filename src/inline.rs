//! Local image inlining.
//!
//! Document bodies reference images relative to the document's own directory.
//! The generated site is a flat set of HTML files, so those references would
//! break once the page is written elsewhere. Instead, every local image is
//! embedded as a base64 `data:` URI.
//!
//! Two reference forms are recognised:
//!
//! ```text
//! ![Alt text](images/diagram.png)
//! <img class="wide" src="images/diagram.png" alt="Diagram">
//! ```
//!
//! References are left untouched when they are remote (`https://…`, any
//! `scheme://`), already embedded (`data:`), or when the target file is
//! missing or unreadable.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static MARKDOWN_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("valid markdown image regex"));

static HTML_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img\b([^>]*?)\bsrc=["']([^"']+)["']([^>]*?)>"#)
        .expect("valid html image regex")
});

static URL_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://").expect("valid scheme regex"));

/// Fallback when the extension is unknown.
const DEFAULT_MIME: &str = "image/png";

/// Guess an image MIME type from a file extension.
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        "ico" => "image/vnd.microsoft.icon",
        "tif" | "tiff" => "image/tiff",
        _ => DEFAULT_MIME,
    }
}

/// True for references that must never be touched.
fn is_external(url: &str) -> bool {
    URL_SCHEME.is_match(url) || url.starts_with("data:")
}

/// Encode the image at `url` (relative to `doc_dir`) as a data URI.
///
/// Returns `None` for external references and for files that do not exist or
/// cannot be read.
pub fn to_data_uri(url: &str, doc_dir: &Path) -> Option<String> {
    if is_external(url) {
        return None;
    }

    let path = doc_dir.join(url);
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "image reference does not resolve to a file");
        return None;
    }

    match fs::read(&path) {
        Ok(bytes) => Some(format!(
            "data:{};base64,{}",
            mime_for(&path),
            STANDARD.encode(bytes)
        )),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read image, leaving reference as is");
            None
        }
    }
}

/// Replace every local image reference in `markdown` with a data URI.
pub fn embed_local_images(markdown: &str, doc_dir: &Path) -> String {
    let markdown = MARKDOWN_IMAGE.replace_all(markdown, |caps: &Captures| {
        let alt = &caps[1];
        match to_data_uri(caps[2].trim(), doc_dir) {
            Some(uri) => format!("![{alt}]({uri})"),
            None => caps[0].to_string(),
        }
    });

    HTML_IMAGE
        .replace_all(&markdown, |caps: &Captures| {
            let (before, after) = (&caps[1], &caps[3]);
            match to_data_uri(caps[2].trim(), doc_dir) {
                Some(uri) => format!("<img{before} src=\"{uri}\"{after}>"),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
