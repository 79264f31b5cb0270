//! Content-type resolution by file extension.

use std::path::Path;

/// Returned for extensions outside the table.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

const CONTENT_TYPES: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("gif", "image/gif"),
    ("ico", "image/x-icon"),
    ("json", "application/json"),
    ("txt", "text/plain"),
];

/// Resolve the MIME type of `path` from its extension, ignoring case.
pub fn content_type_for(path: impl AsRef<Path>) -> &'static str {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| {
            CONTENT_TYPES
                .iter()
                .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        })
        .map_or(DEFAULT_CONTENT_TYPE, |&(_, mime)| mime)
}

/// The canonical extension (without the dot) for a MIME type in the table.
pub fn extension_for(mime: &str) -> Option<&'static str> {
    CONTENT_TYPES
        .iter()
        .find(|(_, known)| *known == mime)
        .map(|&(ext, _)| ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(content_type_for("/index.html"), "text/html");
        assert_eq!(content_type_for("site.css"), "text/css");
        assert_eq!(content_type_for("app.js"), "application/javascript");
        assert_eq!(content_type_for("logo.png"), "image/png");
        assert_eq!(content_type_for("photo.jpg"), "image/jpeg");
        assert_eq!(content_type_for("anim.gif"), "image/gif");
        assert_eq!(content_type_for("favicon.ico"), "image/x-icon");
        assert_eq!(content_type_for("data.json"), "application/json");
        assert_eq!(content_type_for("notes.txt"), "text/plain");
    }

    #[test]
    fn test_extension_case_is_ignored() {
        assert_eq!(content_type_for("INDEX.HTML"), "text/html");
        assert_eq!(content_type_for("Photo.JpG"), "image/jpeg");
    }

    #[test]
    fn test_unknown_or_missing_extension() {
        assert_eq!(content_type_for("archive.tar.gz"), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for("README"), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for("photo.jpeg"), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_lookup_is_stable_through_extension_for() {
        for (ext, mime) in CONTENT_TYPES {
            let resolved = content_type_for(format!("file.{ext}"));
            assert_eq!(resolved, *mime);
            let back = extension_for(resolved).unwrap();
            assert_eq!(content_type_for(format!("file.{back}")), resolved);
        }
        assert_eq!(extension_for(DEFAULT_CONTENT_TYPE), None);
    }
}
