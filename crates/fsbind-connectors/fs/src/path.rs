//! Target path construction.

use std::path::PathBuf;

/// Join `folder` and `file` with `/` and clean the result lexically.
///
/// Repeated separators collapse, `.` elements are dropped and `..` removes
/// the preceding element. Nothing touches the filesystem and symlinks are
/// not resolved, so `..` can still climb above `folder`.
pub fn join_path(folder: &str, file: &str) -> PathBuf {
    let joined = [folder, file]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");
    PathBuf::from(clean(&joined))
}

fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                // `/..` is `/`
                _ if rooted => {}
                _ => parts.push(".."),
            },
            _ => parts.push(part),
        }
    }

    let body = parts.join("/");
    match (rooted, body.is_empty()) {
        (true, _) => format!("/{}", body),
        (false, true) => ".".to_string(),
        (false, false) => body,
    }
}
