//! Path and filter utilities

use anyhow::{Context, Result, bail};
use std::path::{Component, Path, PathBuf};

/// Convert absolute path to relative path from base
pub fn path_relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    path.strip_prefix(base).ok().map(|p| p.to_path_buf())
}

/// Render a relative path for the index: components joined with `/`, any stray backslashes normalized too.
pub fn path_to_index_string(path: &Path) -> String {
    let joined = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            Component::ParentDir => Some("..".into()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");
    joined.replace('\\', "/")
}

/// Index path for a file: relative to `public_root` when the file is under it, else relative to `root`.
pub fn relative_entry_path(abs_path: &Path, root: &Path, public_root: Option<&Path>) -> String {
    let rel = public_root
        .and_then(|p| path_relative_to(abs_path, p))
        .or_else(|| path_relative_to(abs_path, root))
        .unwrap_or_else(|| abs_path.to_path_buf());
    path_to_index_string(&rel)
}

/// Returns true if the path should be sent to the readers (not the root, not a skipped path, not excluded).
pub fn should_include_in_walk(
    path: &Path,
    root: &Path,
    skip_paths: &[PathBuf],
    exclude_patterns: &[String],
) -> bool {
    if path == root {
        return false;
    }
    if skip_paths.iter().any(|p| p == path) {
        return false;
    }
    !is_excluded(path, root, exclude_patterns)
}

/// True if an exclude pattern matches any component of the path below `root`, or the whole relative path.
/// The root itself is never excluded. Used both to prune directories during the walk and to filter files.
pub fn is_excluded(path: &Path, root: &Path, exclude_patterns: &[String]) -> bool {
    if exclude_patterns.is_empty() || path == root {
        return false;
    }
    let rel = path_relative_to(path, root).unwrap_or_else(|| path.to_path_buf());
    let rel_str = path_to_index_string(&rel);
    exclude_patterns.iter().any(|pattern| {
        glob_match(pattern, &rel_str)
            || rel
                .components()
                .filter_map(|c| c.as_os_str().to_str())
                .any(|name| glob_match(pattern, name))
    })
}

/// Glob match supporting `*` (any run of characters) and `?` (one character).
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();
    let (mut pi, mut ti) = (0, 0);
    // Position of the last `*` seen and the text index it is currently absorbing up to.
    let mut star: Option<(usize, usize)> = None;

    while ti < t.len() {
        match p.get(pi) {
            Some('*') => {
                star = Some((pi, ti));
                pi += 1;
            }
            Some(&c) if c == '?' || c == t[ti] => {
                pi += 1;
                ti += 1;
            }
            _ => match star {
                Some((sp, st)) => {
                    pi = sp + 1;
                    ti = st + 1;
                    star = Some((sp, st + 1));
                }
                None => return false,
            },
        }
    }
    p[pi..].iter().all(|&c| c == '*')
}

/// Canonicalize the scan root; it must be an existing directory.
pub fn check_root_and_canonicalize(path: &Path) -> Result<PathBuf> {
    let canonical = path
        .canonicalize()
        .with_context(|| format!("Could not list the directory {}", path.display()))?;
    if !canonical.is_dir() {
        bail!(
            "Could not list the directory {}: not a directory",
            path.display()
        );
    }
    Ok(canonical)
}

/// Canonicalize a path that may not exist yet: canonical parent joined with the file name.
/// Returns None if the parent does not exist either.
pub fn canonicalize_maybe_missing(path: &Path) -> Option<PathBuf> {
    if let Ok(p) = path.canonicalize() {
        return Some(p);
    }
    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    parent.canonicalize().ok().map(|p| p.join(name))
}

/// Canonicalize root, optional public root, and paths the walk must skip (e.g. the output file).
pub fn canonicalize_paths(
    root: &Path,
    public_root: Option<&Path>,
    skip_paths: &[PathBuf],
) -> Result<(PathBuf, Option<PathBuf>, Vec<PathBuf>)> {
    let root = check_root_and_canonicalize(root)?;
    let public_canonical = public_root.and_then(|p| p.canonicalize().ok());
    let skip_canonical = skip_paths
        .iter()
        .filter_map(|p| canonicalize_maybe_missing(p))
        .collect();
    Ok((root, public_canonical, skip_canonical))
}
