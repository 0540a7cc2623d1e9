use uuid::Uuid;

/// Build a blob key for an upload: `{folder}/{uuid}{ext}`.
///
/// Every key embeds a freshly generated UUID v4, so keys are unique by
/// construction and concurrent uploads cannot collide. The extension is
/// taken from the original filename, lowercased, and kept so direct URLs
/// stay recognizable to browsers.
#[must_use]
pub fn object_key(folder: &str, original_filename: &str) -> String {
    let ext = extension_suffix(original_filename);
    format!("{folder}/{}{ext}", Uuid::new_v4())
}

/// Lowercased extension suffix including the dot, or an empty string.
fn extension_suffix(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            format!(".{}", ext.to_ascii_lowercase())
        }
        _ => String::new(),
    }
}

/// Sanitize an uploaded filename for storage.
///
/// Strips any path components, then replaces every character outside
/// `[A-Za-z0-9._-]` with `_`. Leading dots are dropped so a sanitized name
/// can never be a hidden file or a relative traversal.
#[must_use]
pub fn sanitize_filename(raw: &str) -> String {
    let base = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim_start_matches('.');

    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
