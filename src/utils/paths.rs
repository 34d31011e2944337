use crate::utils::Result;
use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: `.` segments are dropped and `..` pops the
/// previous normal segment. `..` never climbs above a root.
pub fn normalize_path(path: impl AsRef<Path>) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();

    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }

    parts.into_iter().collect()
}

/// Render a path with forward slashes, the form used in generated specifiers.
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Absolute in the posix sense (leading `/`) or on the host platform.
pub fn is_absolute_url(url: &str) -> bool {
    url.starts_with('/') || Path::new(url).is_absolute()
}

/// Resolve `target` against `base_dir`. A relative result is anchored at the
/// process working directory.
pub fn resolve_path(base_dir: &Path, target: &str) -> Result<PathBuf> {
    let joined = base_dir.join(target);
    let anchored = if joined.has_root() {
        joined
    } else {
        std::env::current_dir()?.join(joined)
    };
    Ok(normalize_path(anchored))
}

/// Directory that holds `file`, `.` when it has none.
pub fn parent_dir(file: &Path) -> PathBuf {
    match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Path of `to` relative to the directory `from_dir`, both normalized first.
pub fn relative_path(from_dir: &Path, to: &Path) -> PathBuf {
    let from = normalize_path(from_dir);
    let to = normalize_path(to);

    let from_parts: Vec<Component> = from
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let to_parts: Vec<Component> = to.components().collect();

    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..from_parts.len() {
        relative.push("..");
    }
    for part in &to_parts[common..] {
        relative.push(part.as_os_str());
    }

    if relative.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        relative
    }
}
