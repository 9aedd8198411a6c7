//! Path helpers used to follow `mtllib` and `map_*` references.

use std::path::{Component, Path, PathBuf};

/// Directory containing `path`, or an empty path for bare file names.
pub fn directory_of(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

/// `true` for `/rooted` names and drive-letter names such as `C:\tex.png`.
pub fn is_absolute_name(name: &str) -> bool {
    name.starts_with('/') || name.as_bytes().get(1) == Some(&b':') || Path::new(name).is_absolute()
}

/// Resolve `name` against `base_dir` unless it is already absolute.
pub fn resolve(base_dir: &Path, name: &str) -> PathBuf {
    if is_absolute_name(name) {
        PathBuf::from(name)
    } else {
        normalize(&base_dir.join(name))
    }
}

/// Lexically drop `.` components and fold `dir/..` pairs.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().collect()
}
