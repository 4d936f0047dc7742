//! Hash-route handling for the page loaded into each window

use std::path::{Path, PathBuf};

/// Turn the host's requested path into the fragment appended to the page URL.
///
/// - no path (or an empty one) opens `default_route`
/// - a path starting with `/` becomes a hash route: `/foo` -> `#/foo`
/// - anything else is used as given
pub fn normalize(path: Option<&str>, default_route: &str) -> String {
    let path = match path {
        Some(p) if !p.is_empty() => p,
        _ => default_route,
    };
    if path.starts_with('/') {
        format!("#{}", path)
    } else {
        path.to_string()
    }
}

/// `file://` URL of `page` with `route` appended.
///
/// Characters in the path that a URL would read as a delimiter (`#`, `?`),
/// an escape (`%`) or a break (space) are percent-encoded. `route` is
/// appended as given.
pub fn page_url(page: &Path, route: &str) -> String {
    let absolute = if page.is_absolute() {
        page.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|dir| dir.join(page))
            .unwrap_or_else(|_| PathBuf::from(page))
    };
    let mut path = absolute.to_string_lossy().replace('\\', "/");
    if !path.starts_with('/') {
        path.insert(0, '/');
    }
    format!("file://{}{}", escape_path(&path), route)
}

fn escape_path(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for c in path.chars() {
        match c {
            '%' => escaped.push_str("%25"),
            '#' => escaped.push_str("%23"),
            '?' => escaped.push_str("%3F"),
            ' ' => escaped.push_str("%20"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: &str = "/request/latest/0";

    #[test]
    fn test_missing_path_uses_default_route() {
        assert_eq!(normalize(None, DEFAULT), "#/request/latest/0");
        assert_eq!(normalize(Some(""), DEFAULT), "#/request/latest/0");
    }

    #[test]
    fn test_leading_slash_becomes_hash_route() {
        assert_eq!(normalize(Some("/foo"), DEFAULT), "#/foo");
    }

    #[test]
    fn test_hash_route_is_unchanged() {
        assert_eq!(normalize(Some("#/request/saved/3"), DEFAULT), "#/request/saved/3");
    }

    #[test]
    fn test_bare_path_passes_through() {
        assert_eq!(normalize(Some("foo"), DEFAULT), "foo");
    }

    #[test]
    fn test_page_url() {
        assert_eq!(
            page_url(Path::new("/opt/arc/app.html"), "#/foo"),
            "file:///opt/arc/app.html#/foo"
        );
    }

    #[test]
    fn test_page_url_escapes_delimiters_in_path() {
        assert_eq!(
            page_url(Path::new("/opt/my app/#1?/100%/app.html"), "#/x"),
            "file:///opt/my%20app/%231%3F/100%25/app.html#/x"
        );
    }

    #[test]
    fn test_relative_page_is_made_absolute() {
        let url = page_url(Path::new("app.html"), "#/x");
        assert!(url.starts_with("file:///"));
        assert!(url.ends_with("/app.html#/x"));
    }
}
