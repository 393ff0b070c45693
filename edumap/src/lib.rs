// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler helpers for convenience
pub use handlers::{
    SAMPLE_DATASET,
    format_dataset_info,
    format_search_results,
    load_dataset_from_path,
    resolve_dataset,
};
