//! File system utilities used by the merge commands.
//!
//! The merge algorithms are pure; everything that touches the disk goes
//! through here:
//!
//! - [`formats`] - reading text and JSON, writing pretty JSON
//! - [`atomic`] - temp-file-then-rename writes
//! - [`dirs`] - recursive directory creation
//!
//! # Examples
//!
//! ```rust,no_run
//! use tmplmerge::utils::fs::{ensure_dir, safe_write};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! ensure_dir(Path::new("project/.claude"))?;
//! safe_write(Path::new("project/.claude/settings.json"), "{}\n")?;
//! # Ok(())
//! # }
//! ```

pub mod atomic;
pub mod dirs;
pub mod formats;

pub use atomic::{atomic_write, safe_write};
pub use dirs::{ensure_dir, ensure_parent_dir};
pub use formats::{
    read_json_object, read_json_value, read_text_file, to_pretty_json, write_json_pretty,
    write_text_file,
};
