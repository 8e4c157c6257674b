// TodoStore - In-memory todo list with paging, bulk selection and CSV export

pub mod config;
pub mod export;
pub mod filter;
pub mod models;
pub mod record;
pub mod sample;
pub mod saver;
pub mod shell;
pub mod store;

// Re-export main types for convenience
pub use config::Config;
pub use filter::StatusFilter;
pub use models::{Todo, TodoId};
pub use record::{CsvRecord, FieldValue};
pub use saver::{FileSaver, MemorySaver, Saver};
pub use shell::{Command, Shell};
pub use store::TodoStore;
