use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::config::PackagePaths;

/// Temp path the output is written to before the rename (e.g. `articleIndex.json.artindex.tmp`).
pub fn temp_path_for(output_path: &Path) -> PathBuf {
    let name = output_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_path
        .parent()
        .unwrap_or(Path::new("."))
        .join(format!("{name}.{}", PackagePaths::get().temp_suffix()))
}

/// Write `bytes` to `path` via a sibling temp file and rename, so readers never see a half-written file.
/// The temp file is removed if the write or rename fails.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(path);
    if let Err(e) = fs::write(&temp_path, bytes) {
        let _ = fs::remove_file(&temp_path);
        return Err(e).with_context(|| format!("write temp file {}", temp_path.display()));
    }
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e).with_context(|| {
            format!(
                "rename temp file to final path ({} -> {})",
                temp_path.display(),
                path.display()
            )
        });
    }
    Ok(())
}
