use url::Url;

/// Join a base URL and a path found in a page by plain concatenation.
///
/// The path is trimmed first. A slash present on both sides of the junction
/// is collapsed to one; absolute URLs in `path` are returned unchanged.
pub fn join_url(base: &str, path: &str) -> String {
    let path = path.trim();

    if Url::parse(path).is_ok() {
        return path.to_string();
    }

    match (base.ends_with('/'), path.strip_prefix('/')) {
        (true, Some(rest)) => format!("{}{}", base, rest),
        _ => format!("{}{}", base, path),
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
