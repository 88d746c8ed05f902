//! Structural and textual diffs for assertion messages.
//!
//! [`diff`] compares two values and, when they differ, renders both with the
//! deterministic printer and returns a unified diff of the two renderings.
//! [`text_diff`] and [`context_diff`] do the same for raw text.
//!
//! Every non-empty result starts with a newline so it can be appended
//! directly after a failure message.
//!
//! # Examples
//!
//! ```
//! use assay::diff;
//!
//! assert_eq!(diff("a", "a"), "");
//!
//! let out = diff("a", "b");
//! assert!(out.starts_with("\n--- expected\n+++ actual\n"));
//! assert!(out.contains("-(string) (len=1) \"a\"\n"));
//! assert!(out.contains("+(string) (len=1) \"b\"\n"));
//! ```

use crate::lines::{diff_lines, group_ops, LineOp, OpKind};
use crate::print::render;
use serde::Serialize;

const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file";
const SAME_RENDERING: &str = "(values are not equal but render identically)";

/// Layout of the rendered diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffFormat {
    /// `---`/`+++` headers with `@@` hunks
    #[default]
    Unified,
    /// `***`/`---` headers with `!` markers for replaced lines
    Context,
}

/// Options for rendering a diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOptions {
    /// Label of the first (old) side
    pub from_label: String,
    /// Label of the second (new) side
    pub to_label: String,
    /// Unchanged lines shown around each change
    pub context_lines: usize,
    /// Unified or context layout
    pub format: DiffFormat,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            from_label: "expected".to_string(),
            to_label: "actual".to_string(),
            context_lines: 2,
            format: DiffFormat::Unified,
        }
    }
}

/// Returns a unified diff of two values, or `""` if they are equal.
///
/// Equality is checked with `PartialEq` first; values are only rendered when
/// they differ. Unequal values whose renderings match (a `#[serde(skip)]`
/// field, say) still produce a non-empty result: the headers followed by a
/// note instead of hunks.
///
/// # Panics
///
/// Panics if either value's `Serialize` impl reports an error. A diff built
/// from a half-rendered value would hide the real failure.
pub fn diff<T: PartialEq + Serialize + ?Sized>(expected: &T, actual: &T) -> String {
    diff_with(expected, actual, &DiffOptions::default())
}

/// Like [`diff`], with explicit labels, context and layout.
pub fn diff_with<T: PartialEq + Serialize + ?Sized>(
    expected: &T,
    actual: &T,
    options: &DiffOptions,
) -> String {
    if expected == actual {
        return String::new();
    }

    let (old, new) = match (render(expected), render(actual)) {
        (Ok(old), Ok(new)) => (old, new),
        (Err(err), _) | (_, Err(err)) => panic!("error producing diff: {err}"),
    };
    tracing::debug!(
        expected_bytes = old.len(),
        actual_bytes = new.len(),
        "rendered values for diff"
    );

    if old == new {
        tracing::debug!("unequal values render identically");
        return format!("\n{}{SAME_RENDERING}\n", headers(options));
    }
    with_leading_newline(render_text(&old, &new, options))
}

/// Returns a unified diff of two texts, or `""` if they are identical.
///
/// # Examples
///
/// ```
/// use assay::text_diff;
///
/// let out = text_diff("hello\nworld\n", "hello\nmars\n");
/// assert_eq!(
///     out,
///     "\n--- expected\n+++ actual\n@@ -1,2 +1,2 @@\n hello\n-world\n+mars\n"
/// );
/// ```
pub fn text_diff(expected: &str, actual: &str) -> String {
    text_diff_with(expected, actual, &DiffOptions::default())
}

/// Returns a context diff of two texts, or `""` if they are identical.
pub fn context_diff(expected: &str, actual: &str) -> String {
    let options = DiffOptions {
        format: DiffFormat::Context,
        ..Default::default()
    };
    text_diff_with(expected, actual, &options)
}

/// Like [`text_diff`], with explicit labels, context and layout.
pub fn text_diff_with(expected: &str, actual: &str, options: &DiffOptions) -> String {
    if expected == actual {
        return String::new();
    }
    with_leading_newline(render_text(expected, actual, options))
}

/// Splits both texts into lines (keeping terminators) and renders the diff.
///
/// Returns `""` when the texts have no differing lines. No leading newline
/// is added.
pub fn render_text(old: &str, new: &str, options: &DiffOptions) -> String {
    let old: Vec<&str> = old.split_inclusive('\n').collect();
    let new: Vec<&str> = new.split_inclusive('\n').collect();

    match options.format {
        DiffFormat::Unified => render_unified(&old, &new, options),
        DiffFormat::Context => render_context(&old, &new, options),
    }
}

/// Renders a unified diff of two line sequences.
pub fn render_unified(old: &[&str], new: &[&str], options: &DiffOptions) -> String {
    let hunks = group_ops(&diff_lines(old, new), options.context_lines);
    if hunks.is_empty() {
        return String::new();
    }
    tracing::debug!(hunks = hunks.len(), "rendering unified diff");

    let mut output = headers(options);
    for hunk in &hunks {
        let (Some(first), Some(last)) = (hunk.first(), hunk.last()) else {
            continue;
        };
        output.push_str(&format!(
            "@@ -{} +{} @@\n",
            unified_range(first.old.start, last.old.end),
            unified_range(first.new.start, last.new.end)
        ));

        for op in hunk {
            if op.kind == OpKind::Equal {
                push_lines(&mut output, " ", &old[op.old.clone()]);
            } else {
                push_lines(&mut output, "-", &old[op.old.clone()]);
                push_lines(&mut output, "+", &new[op.new.clone()]);
            }
        }
    }

    output
}

/// Renders a context diff of two line sequences.
pub fn render_context(old: &[&str], new: &[&str], options: &DiffOptions) -> String {
    let hunks = group_ops(&diff_lines(old, new), options.context_lines);
    if hunks.is_empty() {
        return String::new();
    }
    tracing::debug!(hunks = hunks.len(), "rendering context diff");

    let mut output = headers(options);
    for hunk in &hunks {
        let (Some(first), Some(last)) = (hunk.first(), hunk.last()) else {
            continue;
        };

        output.push_str("***************\n");
        output.push_str(&format!(
            "*** {} ****\n",
            context_range(first.old.start, last.old.end)
        ));
        if has_kind(hunk, &[OpKind::Replace, OpKind::Delete]) {
            for op in hunk.iter().filter(|op| op.kind != OpKind::Insert) {
                push_lines(&mut output, context_prefix(op.kind), &old[op.old.clone()]);
            }
        }

        output.push_str(&format!(
            "--- {} ----\n",
            context_range(first.new.start, last.new.end)
        ));
        if has_kind(hunk, &[OpKind::Replace, OpKind::Insert]) {
            for op in hunk.iter().filter(|op| op.kind != OpKind::Delete) {
                push_lines(&mut output, context_prefix(op.kind), &new[op.new.clone()]);
            }
        }
    }

    output
}

/// File header lines for the configured layout.
fn headers(options: &DiffOptions) -> String {
    match options.format {
        DiffFormat::Unified => format!("--- {}\n+++ {}\n", options.from_label, options.to_label),
        DiffFormat::Context => format!("*** {}\n--- {}\n", options.from_label, options.to_label),
    }
}

fn with_leading_newline(diff: String) -> String {
    if diff.is_empty() {
        diff
    } else {
        format!("\n{diff}")
    }
}

fn has_kind(hunk: &[LineOp], kinds: &[OpKind]) -> bool {
    hunk.iter().any(|op| kinds.contains(&op.kind))
}

fn context_prefix(kind: OpKind) -> &'static str {
    match kind {
        OpKind::Equal => "  ",
        OpKind::Insert => "+ ",
        OpKind::Delete => "- ",
        OpKind::Replace => "! ",
    }
}

/// Writes each line with `prefix`, marking a missing final newline.
fn push_lines(output: &mut String, prefix: &str, lines: &[&str]) {
    for line in lines {
        output.push_str(prefix);
        output.push_str(line);
        if !line.ends_with('\n') {
            output.push('\n');
            output.push_str(NO_NEWLINE_MARKER);
            output.push('\n');
        }
    }
}

/// Formats a half-open line range as `start,len` (1-based start).
///
/// An empty range names the line before it.
fn unified_range(start: usize, end: usize) -> String {
    let len = end - start;
    let begin = if len == 0 { start } else { start + 1 };
    format!("{begin},{len}")
}

/// Formats a half-open line range as `first,last` (1-based, inclusive).
fn context_range(start: usize, end: usize) -> String {
    let len = end - start;
    let begin = if len == 0 { start } else { start + 1 };
    if len <= 1 {
        begin.to_string()
    } else {
        format!("{},{}", begin, begin + len - 1)
    }
}
