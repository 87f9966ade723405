//! User interface module - human-readable diagnostics on stderr.
//!
//! stdout is reserved for the `key=value` output line when no output file is
//! configured, so everything here writes to stderr.

pub mod formatter;

pub use formatter::{
    display_error, display_result, display_status, display_success, format_result,
};
