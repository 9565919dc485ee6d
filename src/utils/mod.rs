//! Cross-platform utilities and helpers
//!
//! - [`fs`] - path normalization, directory creation and atomic writes
//! - [`platform`] - executable names, PATH lookups and user path expansion

pub mod fs;
pub mod platform;

pub use fs::{atomic_write, ensure_dir, normalize_path, resolve_lenient};
pub use platform::{command_exists, expand_path, get_vagrant_command, is_windows};
