use std::path::Path;

/// Render a path with `/` separators regardless of platform.
pub fn normalize_path(path: &Path) -> String {
    normalize_separators(&path.to_string_lossy())
}

pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// File name portion of a `/` or `\` separated path.
pub fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
