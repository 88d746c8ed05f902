//! ASSAY - Helpers for writing tests.
//!
//! The centrepiece is [`diff`], which compares two values and renders a
//! unified diff of their pretty-printed forms for assertion messages. The
//! remaining helpers cover the chores around it: text diffs, error message
//! checks, temp files, in-process handler calls, multipart bodies and
//! indentation of text literals.
//!
//! # Example
//!
//! ```
//! use assay::diff;
//! use serde::Serialize;
//!
//! #[derive(Debug, PartialEq, Serialize)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! let want = User { name: "Alice".into(), age: 30 };
//! let got = User { name: "Alice".into(), age: 31 };
//!
//! let d = diff(&want, &got);
//! assert!(d.contains("-  age: (u32) 30"));
//! assert!(d.contains("+  age: (u32) 31"));
//! ```

pub mod assert;
pub mod diff;
pub mod error;
pub mod handler;
pub mod lines;
pub mod multipart;
pub mod print;
pub mod temp;
pub mod text;

// Re-export commonly used types for convenience
pub use assert::error_contains;
pub use diff::{
    context_diff, diff, diff_with, render_text, text_diff, text_diff_with, DiffFormat,
    DiffOptions,
};
pub use error::{AssayError, HttpError, MultipartError, PrintError};
pub use handler::{call, Recorded};
pub use multipart::{multipart, Multipart, MultipartBody};
pub use print::{render, render_with, PrintConfig};
pub use temp::{temp_file, TempFile};
pub use text::normalize_indent;
