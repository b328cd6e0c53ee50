//! Virtual-path normalization for the scoped filesystem handle scheme.

/// Normalizes a virtual path to its canonical `/`-rooted form.
///
/// Whitespace is trimmed, backslashes become `/`, `.`/`..` segments are
/// resolved (never above the root), and the result always carries a leading
/// slash; empty or fully-collapsed input yields `/`.
pub fn normalize_virtual_path(path: &str) -> String {
    let forward = path.trim().replace('\\', "/");
    let mut segments: Vec<&str> = Vec::new();

    for segment in forward.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}
