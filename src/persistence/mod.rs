pub mod document;
pub mod files;

pub use document::{load_document, save_document};
pub use files::{atomic_write, backup_file, data_file, ensure_data_dir, init_local_data_dir, read_file};
