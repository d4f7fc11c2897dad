//! Remote-path helpers shared by the API layer and the browser view.

/// Normalizes a remote storage path.
///
/// This helper trims whitespace, converts backslashes to `/`, resolves `.`/`..`, ensures a
/// leading slash, and returns `/` for empty or fully-collapsed paths.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "/".to_string();
    }

    let mut out = String::new();
    for segment in trimmed.replace('\\', "/").split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment == ".." {
            if let Some(idx) = out.rfind('/') {
                out.truncate(idx);
            }
            continue;
        }
        out.push('/');
        out.push_str(segment);
    }

    if out.is_empty() {
        "/".to_string()
    } else {
        out
    }
}

/// Returns `true` for the storage root.
pub fn is_root(path: &str) -> bool {
    normalize_path(path) == "/"
}

/// Appends a child name to a directory path.
pub fn join_path(dir: &str, name: &str) -> String {
    normalize_path(&format!("{}/{}", dir, name))
}

/// Returns the parent directory of `path` (the root is its own parent).
pub fn parent_path(path: &str) -> String {
    join_path(path, "..")
}

/// Returns the last segment of a path, or an empty string for the root.
pub fn file_name(path: &str) -> String {
    normalize_path(path)
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_path_matches_expected_cases() {
        let cases = [
            ("", "/"),
            ("   ", "/"),
            ("foo/bar", "/foo/bar"),
            ("/foo//bar/", "/foo/bar"),
            ("./foo/../bar", "/bar"),
            ("\\\\foo\\\\bar", "/foo/bar"),
            ("/../../", "/"),
        ];

        for (input, expected) in cases {
            assert_eq!(normalize_path(input), expected, "input={input:?}");
        }
    }

    #[test]
    fn join_and_parent_stay_normalized() {
        assert_eq!(join_path("/", "docs"), "/docs");
        assert_eq!(join_path("/docs/", "a.txt"), "/docs/a.txt");
        assert_eq!(parent_path("/docs/reports"), "/docs");
        assert_eq!(parent_path("/docs"), "/");
        assert_eq!(parent_path("/"), "/");
        assert!(is_root(" / "));
        assert!(!is_root("/docs"));
    }

    #[test]
    fn file_name_returns_last_segment() {
        assert_eq!(file_name("/docs/a.txt"), "a.txt");
        assert_eq!(file_name("/"), "");
    }
}
