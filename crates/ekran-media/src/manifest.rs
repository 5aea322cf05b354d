use url::Url;

/// Path suffixes that identify an adaptive-streaming manifest.
pub const MANIFEST_SUFFIXES: &[&str] = &[".m3u8"];

/// `true` when the address path names an adaptive-streaming manifest.
///
/// Only [`Url::path`] is inspected; query and fragment never make an
/// address adaptive. Comparison is ASCII case-insensitive.
#[must_use]
pub fn is_manifest_address(address: &Url) -> bool {
    let path = address.path().as_bytes();
    MANIFEST_SUFFIXES.iter().any(|suffix| {
        let suffix = suffix.as_bytes();
        path.len() >= suffix.len() && path[path.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
    })
}
