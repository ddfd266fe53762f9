//! Canonical storage path extraction
//!
//! Raw media references arrive as plain bucket-relative paths, public
//! storage URLs, or previously signed storage URLs. The cache key is always
//! the canonical bucket-relative path, never the raw input, so all three
//! spellings of the same object collapse to one cache entry.

use percent_encoding::percent_decode_str;
use url::Url;

/// Path marker of public object URLs, relative to the storage root
const PUBLIC_OBJECT_MARKER: &str = "/storage/v1/object/public/";

/// Path marker of signed object URLs, relative to the storage root
const SIGNED_OBJECT_MARKER: &str = "/storage/v1/object/sign/";

/// Extract the canonical bucket-relative path from a raw media reference
///
/// Non-URL input is treated as already canonical (leading slash trimmed).
/// Absolute URLs must carry the public or signed object marker for the
/// given bucket; anything else is not storage-backed and yields `None`,
/// a defined outcome rather than an error. Marker matches are
/// query-stripped and percent-decoded.
pub fn extract_storage_path(raw: &str, bucket: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if Url::parse(raw).is_err() {
        return Some(raw.trim_start_matches('/').to_string());
    }

    for marker in [PUBLIC_OBJECT_MARKER, SIGNED_OBJECT_MARKER] {
        let prefix = format!("{}{}/", marker, bucket);
        if let Some(idx) = raw.find(&prefix) {
            let rest = &raw[idx + prefix.len()..];
            let path = rest.split('?').next().unwrap_or_default();
            if path.is_empty() {
                return None;
            }
            let decoded = percent_decode_str(path).decode_utf8().ok()?;
            return Some(decoded.into_owned());
        }
    }

    None
}

/// Whether a raw reference is itself a usable absolute http(s) URL
///
/// Used for passthrough: non-storage references that are well-formed URLs
/// render as-is, everything else resolves to nothing.
pub fn is_usable_url(raw: &str) -> bool {
    match Url::parse(raw.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
