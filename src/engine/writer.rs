//! Output writer: normalize the consumer's result and persist it.

use log::{error, info};
use std::path::Path;

use crate::utils::write_atomic;

/// Replace every doubled backslash (an escaped Windows separator in JSON) with `/`.
pub fn normalize_separators(result: &str) -> String {
    result.replace("\\\\", "/")
}

/// Normalize and write `result` to `output_path`. Failure is logged, not returned.
pub fn write_index(result: &str, output_path: &Path) {
    let normalized = normalize_separators(result);
    match write_atomic(output_path, normalized.as_bytes()) {
        Ok(()) => {
            info!("Index written to {}", output_path.display());
        }
        Err(e) => {
            error!("Error writing file: {e:#}");
        }
    }
}
