//! Magic-number sniffing over the leading bytes of an upload.
//!
//! Container formats whose signature is shared by several concrete types
//! (ZIP-based office documents, OLE2 legacy office, Matroska vs WebM) are
//! disambiguated by the filename extension. The signature list covers the
//! formats MemVault accepts; anything else falls through to the extension
//! table.

/// ISO base-media brands that identify a QuickTime movie.
const QT_BRANDS: [&[u8; 4]; 2] = [b"qt  ", b"3gp4"];

/// ISO base-media brands that identify a HEIF still image.
const HEIF_BRANDS: [&[u8; 4]; 3] = [b"heic", b"heix", b"mif1"];

/// Sniff a MIME type from the leading bytes of a file.
///
/// `extension` is the lowercased filename extension without the dot, used
/// only to resolve ambiguous container signatures. Returns `None` when no
/// signature matches.
#[must_use]
pub fn sniff(head: &[u8], extension: Option<&str>) -> Option<&'static str> {
    if head.starts_with(b"\x89PNG\r\n\x1a\n") {
        return Some("image/png");
    }
    if head.starts_with(b"\xff\xd8\xff") {
        return Some("image/jpeg");
    }
    if head.starts_with(b"GIF87a") || head.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    if head.len() >= 12 && head.starts_with(b"RIFF") {
        if &head[8..12] == b"WEBP" {
            return Some("image/webp");
        }
        if &head[8..12] == b"AVI " {
            return Some("video/x-msvideo");
        }
        return None;
    }
    if head.starts_with(b"BM") {
        return Some("image/bmp");
    }
    if head.starts_with(b"II\x2a\x00") || head.starts_with(b"MM\x00\x2a") {
        return Some("image/tiff");
    }
    if head.starts_with(b"<svg") {
        return Some("image/svg+xml");
    }
    if head.starts_with(b"<?xml") && extension == Some("svg") {
        return Some("image/svg+xml");
    }
    if head.starts_with(b"%PDF-") {
        return Some("application/pdf");
    }
    if head.starts_with(b"\xd0\xcf\x11\xe0\xa1\xb1\x1a\xe1") {
        // OLE2 compound file: legacy office formats share this signature.
        return Some(match extension {
            Some("xls") => "application/vnd.ms-excel",
            Some("ppt") => "application/vnd.ms-powerpoint",
            _ => "application/msword",
        });
    }
    if head.starts_with(b"PK\x03\x04") {
        // ZIP container: modern office and OpenDocument formats share it.
        return Some(match extension {
            Some("docx") => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Some("pptx") => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
            Some("odt") => "application/vnd.oasis.opendocument.text",
            Some("ods") => "application/vnd.oasis.opendocument.spreadsheet",
            Some("odp") => "application/vnd.oasis.opendocument.presentation",
            _ => "application/zip",
        });
    }
    if head.starts_with(b"\x1a\x45\xdf\xa3") {
        // EBML header: Matroska and WebM share it.
        return Some(if extension == Some("webm") {
            "video/webm"
        } else {
            "video/x-matroska"
        });
    }
    if head.len() >= 12 && &head[4..8] == b"ftyp" {
        let brand: &[u8] = &head[8..12];
        if QT_BRANDS.iter().any(|b| brand == *b) {
            return Some("video/quicktime");
        }
        if HEIF_BRANDS.iter().any(|b| brand == *b) {
            return Some("image/heic");
        }
        if brand == b"M4V " {
            return Some("video/x-m4v");
        }
        return Some("video/mp4");
    }
    if head.starts_with(b"\x30\x26\xb2\x75\x8e\x66\xcf\x11") {
        return Some("video/x-ms-wmv");
    }
    if head.starts_with(b"FLV\x01") {
        return Some("video/x-flv");
    }
    if head.starts_with(b"\x00\x00\x01\xba") || head.starts_with(b"\x00\x00\x01\xb3") {
        return Some("video/mpeg");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_signature() {
        let head = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";
        assert_eq!(sniff(head, None), Some("image/png"));
    }

    #[test]
    fn jpeg_signature() {
        assert_eq!(sniff(b"\xff\xd8\xff\xe0\x00\x10JFIF", None), Some("image/jpeg"));
    }

    #[test]
    fn gif_signatures() {
        assert_eq!(sniff(b"GIF89a\x01\x00", None), Some("image/gif"));
        assert_eq!(sniff(b"GIF87a\x01\x00", None), Some("image/gif"));
    }

    #[test]
    fn riff_variants() {
        assert_eq!(sniff(b"RIFF\x00\x00\x00\x00WEBPVP8 ", None), Some("image/webp"));
        assert_eq!(
            sniff(b"RIFF\x00\x00\x00\x00AVI LIST", None),
            Some("video/x-msvideo")
        );
        // RIFF with an unknown form type is inconclusive.
        assert_eq!(sniff(b"RIFF\x00\x00\x00\x00WAVEfmt ", None), None);
    }

    #[test]
    fn pdf_signature() {
        assert_eq!(sniff(b"%PDF-1.7\n", None), Some("application/pdf"));
    }

    #[test]
    fn ole2_disambiguated_by_extension() {
        let head = b"\xd0\xcf\x11\xe0\xa1\xb1\x1a\xe1rest";
        assert_eq!(sniff(head, Some("xls")), Some("application/vnd.ms-excel"));
        assert_eq!(sniff(head, Some("ppt")), Some("application/vnd.ms-powerpoint"));
        assert_eq!(sniff(head, Some("doc")), Some("application/msword"));
        assert_eq!(sniff(head, None), Some("application/msword"));
    }

    #[test]
    fn zip_disambiguated_by_extension() {
        let head = b"PK\x03\x04\x14\x00";
        assert_eq!(
            sniff(head, Some("docx")),
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        );
        assert_eq!(
            sniff(head, Some("odt")),
            Some("application/vnd.oasis.opendocument.text")
        );
        assert_eq!(sniff(head, Some("zip")), Some("application/zip"));
        assert_eq!(sniff(head, None), Some("application/zip"));
    }

    #[test]
    fn ebml_disambiguated_by_extension() {
        let head = b"\x1a\x45\xdf\xa3\x01\x00";
        assert_eq!(sniff(head, Some("webm")), Some("video/webm"));
        assert_eq!(sniff(head, Some("mkv")), Some("video/x-matroska"));
        assert_eq!(sniff(head, None), Some("video/x-matroska"));
    }

    #[test]
    fn ftyp_brands() {
        assert_eq!(
            sniff(b"\x00\x00\x00\x20ftypisom\x00\x00\x02\x00", None),
            Some("video/mp4")
        );
        assert_eq!(
            sniff(b"\x00\x00\x00\x14ftypqt  \x00\x00\x00\x00", None),
            Some("video/quicktime")
        );
        assert_eq!(
            sniff(b"\x00\x00\x00\x18ftypheic\x00\x00\x00\x00", None),
            Some("image/heic")
        );
        assert_eq!(
            sniff(b"\x00\x00\x00\x1cftypM4V \x00\x00\x00\x00", None),
            Some("video/x-m4v")
        );
    }

    #[test]
    fn svg_signatures() {
        assert_eq!(sniff(b"<svg xmlns=", None), Some("image/svg+xml"));
        assert_eq!(sniff(b"<?xml version=", Some("svg")), Some("image/svg+xml"));
        // XML prolog without an svg extension is inconclusive.
        assert_eq!(sniff(b"<?xml version=", Some("xml")), None);
    }

    #[test]
    fn unknown_bytes_are_inconclusive() {
        assert_eq!(sniff(b"hello world", None), None);
        assert_eq!(sniff(b"", None), None);
    }
}
