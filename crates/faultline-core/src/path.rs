//! Source path relativization.
//!
//! Absolute build paths leak host layout into logs and API responses, so
//! faults expose their source file relative to a configured document root.

/// Strip `document_root` and any leading separators from `path`.
///
/// An absent or empty root, or a root that does not occur in `path`,
/// leaves the path unchanged.
pub fn relativize(path: &str, document_root: Option<&str>) -> String {
    let root = match document_root {
        Some(root) if !root.is_empty() => root,
        _ => return path.to_string(),
    };

    match path.find(root) {
        Some(idx) => path[idx + root.len()..]
            .trim_start_matches(['/', '\\'])
            .to_string(),
        None => path.to_string(),
    }
}
