//! Extension tables: the fallback extension→MIME map and the per-category
//! extension allow-lists.

use memvault_core::Category;

/// Lowercased filename extension, without the dot.
#[must_use]
pub fn extension_of(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Fallback extension→MIME table, consulted when sniffing is inconclusive.
#[must_use]
pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
    Some(match extension {
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "odt" => "application/vnd.oasis.opendocument.text",
        "ods" => "application/vnd.oasis.opendocument.spreadsheet",
        "odp" => "application/vnd.oasis.opendocument.presentation",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        "mp4" => "video/mp4",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "mov" => "video/quicktime",
        "wmv" => "video/x-ms-wmv",
        "flv" => "video/x-flv",
        "webm" => "video/webm",
        "mpeg" | "mpg" => "video/mpeg",
        _ => return None,
    })
}

/// Filename extensions accepted per category.
#[must_use]
pub fn allowed_extensions(category: Category) -> &'static [&'static str] {
    match category {
        Category::Notes => &[
            "pdf", "txt", "doc", "docx", "ppt", "pptx", "xls", "xlsx", "odt", "ods", "odp",
        ],
        Category::Images => &["png", "jpg", "jpeg", "webp", "svg", "gif", "bmp", "tiff"],
        Category::Videos => &["mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "mpeg", "mpg"],
    }
}
