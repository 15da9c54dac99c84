use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

/// Characters percent-encoded when embedding an object key in a URL path
/// segment. Upload filenames are validated flat, so `/` never appears in a
/// key in practice.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'%')
    .add(b'/');

/// Build the public URL for a stored object key.
pub fn public_url(base_url: &str, key: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        utf8_percent_encode(key, PATH_SEGMENT)
    )
}

/// Derive the storage key from an object URL: percent-decode the whole URL
/// (recovering non-ASCII original filenames), then take the trailing path
/// segment.
///
/// Both the gateway's delete-by-URL path and the orphan sweep's live-set
/// derivation call this one function, so the two can never disagree on what
/// key a URL refers to.
pub fn object_key_from_url(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }

    let decoded = percent_decode_str(url).decode_utf8().ok()?;
    let key = decoded.rsplit('/').next()?.to_string();

    if key.is_empty() { None } else { Some(key) }
}
