//! Working-directory relative path resolution

use crate::error::{ExtensionError, Result};
use std::env;
use std::path::{Component, Path, PathBuf};

/// Resolve `relative` against the current working directory after stepping
/// up `levels_up` parents.
pub fn resolve(relative: &str, levels_up: usize) -> Result<PathBuf> {
    let cwd = env::current_dir().map_err(|e| ExtensionError::io(".", e))?;
    Ok(resolve_from(&cwd, relative, levels_up))
}

/// Same as [`resolve`] with an explicit base directory.
///
/// An absolute `relative` replaces the base entirely, which keeps
/// `resolve_from(b, resolve_from(b, p, 0), 0)` stable.
pub fn resolve_from(base: &Path, relative: &str, levels_up: usize) -> PathBuf {
    let mut joined = base.to_path_buf();
    for _ in 0..levels_up {
        joined.push("..");
    }
    joined.push(relative.trim());
    normalize(&joined)
}

/// Lexically collapse `.` and `..` components. Symlinks are not followed.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            // `..` at the root stays at the root
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(part) => out.push(part),
        }
    }

    out
}
