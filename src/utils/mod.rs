//! Utility functions and helpers.

pub mod http;

/// Absolutize a possibly relative href against a fixed origin.
///
/// Hrefs that already carry a scheme pass through unchanged. Relative
/// hrefs are joined with exactly one separator regardless of whether
/// they start with a slash.
pub fn absolutize(origin: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    let origin = origin.trim_end_matches('/');
    let path = href.trim_start_matches('/');
    format!("{origin}/{path}")
}
