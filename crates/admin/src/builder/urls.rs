//! Comma-joined image URL handling.
//!
//! Variant records store their image list as one comma-joined string. Plain
//! URLs never contain commas, but base64 `data:` URIs always contain exactly
//! one: the boundary between the MIME prefix and the payload
//! (`data:image/png;base64,AAAA==`). A naive comma split corrupts every
//! embedded image, so [`smart_split`] rejoins a `data:` segment with the
//! segment that follows it.

/// Join an image URL list into the stored comma-joined form.
#[must_use]
pub fn join_urls(urls: &[String]) -> String {
    urls.join(",")
}

/// Split a comma-joined URL string, keeping `data:` URIs intact.
///
/// A segment starting with `data:` is rejoined with the immediately
/// following segment before being treated as one URL. Base64 payloads are
/// comma-free, so exactly one rejoin per data URI suffices. Empty segments
/// are dropped.
#[must_use]
pub fn smart_split(joined: &str) -> Vec<String> {
    let mut urls = Vec::new();
    let mut segments = joined.split(',');
    while let Some(segment) = segments.next() {
        if segment.is_empty() {
            continue;
        }
        if segment.starts_with("data:") {
            match segments.next() {
                Some(payload) => urls.push(format!("{segment},{payload}")),
                None => urls.push(segment.to_string()),
            }
        } else {
            urls.push(segment.to_string());
        }
    }
    urls
}

/// Canonical comparison key for image de-duplication.
///
/// `data:` URIs are opaque and compared verbatim; path-like URLs are equal
/// whether or not they carry a leading `/`.
#[must_use]
pub(crate) fn canonical_url_key(url: &str) -> &str {
    if url.starts_with("data:") {
        url
    } else {
        url.trim_start_matches('/')
    }
}
