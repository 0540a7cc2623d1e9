//! Content-type classification for MemVault uploads.
//!
//! [`classify`] determines the real MIME type of an upload from its leading
//! bytes, independent of whatever the client declared: magic-number
//! sniffing first, then a static extension table, then
//! `application/octet-stream`. [`validate`] checks a detected MIME type
//! against a category's allowed family. Both are pure functions of their
//! inputs.

pub mod magic;
pub mod mime;

use memvault_core::Category;
use tracing::debug;

pub use mime::{allowed_extensions, extension_of, mime_for_extension};

/// MIME type reported when neither sniffing nor the extension table
/// recognize the content.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Office, PDF, and text MIME types accepted for the notes category.
const DOCUMENT_MIMES: [&str; 11] = [
    "application/pdf",
    "text/plain",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.oasis.opendocument.text",
    "application/vnd.oasis.opendocument.spreadsheet",
    "application/vnd.oasis.opendocument.presentation",
];

/// Image MIME types accepted in addition to the `image/` prefix rule.
const IMAGE_MIMES: [&str; 7] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
    "image/bmp",
    "image/tiff",
];

/// Video MIME types accepted in addition to the `video/` prefix rule.
const VIDEO_MIMES: [&str; 8] = [
    "video/mp4",
    "video/x-matroska",
    "video/x-msvideo",
    "video/quicktime",
    "video/x-ms-wmv",
    "video/x-flv",
    "video/webm",
    "video/mpeg",
];

/// Detect the MIME type of a file from its leading bytes and filename.
///
/// Sniffs magic numbers first; if inconclusive, falls back to the static
/// extension table; if still unresolved, returns [`OCTET_STREAM`].
#[must_use]
pub fn classify(head: &[u8], filename: &str) -> String {
    let extension = mime::extension_of(filename);

    if let Some(mime) = magic::sniff(head, extension.as_deref()) {
        debug!(mime, filename, "content type sniffed from magic bytes");
        return mime.to_owned();
    }

    if let Some(mime) = extension.as_deref().and_then(mime::mime_for_extension) {
        debug!(mime, filename, "content type resolved from extension table");
        return mime.to_owned();
    }

    debug!(filename, "content type unresolved, defaulting to octet-stream");
    OCTET_STREAM.to_owned()
}

/// Whether `mime` belongs to `category`'s allowed MIME family.
///
/// Notes accept a fixed allow-list of document types; images and videos
/// accept their MIME prefix or an explicit allow-list.
#[must_use]
pub fn validate(mime: &str, category: Category) -> bool {
    match category {
        Category::Notes => DOCUMENT_MIMES.contains(&mime),
        Category::Images => mime.starts_with("image/") || IMAGE_MIMES.contains(&mime),
        Category::Videos => mime.starts_with("video/") || VIDEO_MIMES.contains(&mime),
    }
}

/// Whether the filename carries an extension allowed for `category`.
#[must_use]
pub fn extension_allowed(filename: &str, category: Category) -> bool {
    match mime::extension_of(filename) {
        Some(ext) => mime::allowed_extensions(category).contains(&ext.as_str()),
        None => false,
    }
}
