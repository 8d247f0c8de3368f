use anyhow::{Result, bail};

use super::context::PipelineState;

/// After joining walk and readers: return the first recorded error, if any.
pub fn check_for_first_error(state: &PipelineState) -> Result<()> {
    if let Some(msg) = state.take_error() {
        bail!("{}", msg);
    }
    Ok(())
}

/// Every file the walk discovered must have been delivered before end-of-input is signalled.
pub fn ensure_all_delivered(delivered: usize, discovered: usize) -> Result<()> {
    if delivered != discovered {
        bail!(
            "walk discovered {} files but {} were read",
            discovered,
            delivered
        );
    }
    Ok(())
}
