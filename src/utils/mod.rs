//! Utilities shared by the merge commands.
//!
//! # Modules
//!
//! - [`fs`] - File system operations with atomic writes and JSON helpers

pub mod fs;

pub use fs::{
    ensure_dir, ensure_parent_dir, read_json_object, read_json_value, read_text_file, safe_write,
    write_json_pretty, write_text_file,
};
