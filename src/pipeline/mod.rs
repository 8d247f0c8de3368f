//! Pipeline components: context, walk loop, readers, error handling.

pub mod context;
pub mod error_handler;
pub mod orchestrator;
pub mod reader;
pub mod walk;

pub use context::{PipelineHandles, PipelineTuning, create_pipeline_channels};
pub use error_handler::{check_for_first_error, ensure_all_delivered};
pub use orchestrator::{collect_entries, join_pipeline, run_pipeline};
pub use reader::spawn_reader_workers;
pub use walk::spawn_walk_thread;
