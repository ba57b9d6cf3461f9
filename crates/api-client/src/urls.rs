//! Base URL resolution
//!
//! The configured backend root is an absolute URL ending in the API mount
//! point (for example `https://market.example.com/api`). Resource paths are
//! appended to it verbatim; paths that already target the mount point (as
//! stored image paths do) are joined onto the root with the suffix removed.

/// Suffix the backend root carries and stored media paths may start with
pub const API_SUFFIX: &str = "/api";

/// Resolve a server-relative path against the backend root.
///
/// - empty path: `""`
/// - absolute `http(s)://` URL: returned unchanged
/// - path starting with [`API_SUFFIX`]: root without its `/api` suffix, then path
/// - anything else: root, then path
#[must_use]
pub fn resolve(root: &str, path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    if path.starts_with(API_SUFFIX) {
        return format!("{}{path}", strip_api_suffix(root));
    }

    format!("{root}{path}")
}

/// Browsable absolute URL for a stored media path (item images).
#[must_use]
pub fn full_image_url(root: &str, image_path: &str) -> String {
    resolve(root, image_path)
}

/// The plain backend root, i.e. the configured root without a trailing `/api`.
#[must_use]
pub fn strip_api_suffix(root: &str) -> &str {
    root.strip_suffix(API_SUFFIX).unwrap_or(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "http://localhost:8000/api";

    #[test]
    fn test_empty_path_resolves_to_empty_string() {
        assert_eq!(full_image_url(ROOT, ""), "");
        assert_eq!(resolve(ROOT, ""), "");
    }

    #[test]
    fn test_relative_path_is_appended_to_root() {
        assert_eq!(
            full_image_url(ROOT, "/images/shoe.png"),
            "http://localhost:8000/api/images/shoe.png"
        );
        assert_eq!(resolve(ROOT, "/items/"), "http://localhost:8000/api/items/");
    }

    #[test]
    fn test_api_path_drops_root_suffix() {
        assert_eq!(
            full_image_url(ROOT, "/api/images/shoe.png"),
            "http://localhost:8000/api/images/shoe.png"
        );
    }

    #[test]
    fn test_api_path_with_root_without_suffix() {
        assert_eq!(
            full_image_url("https://market.example.com", "/api/images/a.jpg"),
            "https://market.example.com/api/images/a.jpg"
        );
    }

    #[test]
    fn test_absolute_url_passes_through() {
        let url = "https://cdn.example.com/a.jpg";
        assert_eq!(full_image_url(ROOT, url), url);
    }

    #[test]
    fn test_strip_api_suffix_only_strips_trailing_suffix() {
        assert_eq!(strip_api_suffix(ROOT), "http://localhost:8000");
        assert_eq!(
            strip_api_suffix("http://api.example.com"),
            "http://api.example.com"
        );
    }
}
