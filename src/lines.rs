//! Line-sequence diffing.
//!
//! Myers' algorithm finds a shortest edit script between two sequences of
//! lines in O(ND) time and O(N) space, where N is the combined length and D
//! the number of differing lines. The script is folded into opcodes describing which
//! ranges of the old sequence map onto which ranges of the new one, and the
//! opcodes are grouped into hunks with a fixed amount of surrounding context.

use std::iter;
use std::ops::{Index, IndexMut, Range};

/// What happened to a run of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    /// Lines present in both sequences
    Equal,
    /// Lines only in the new sequence
    Insert,
    /// Lines only in the old sequence
    Delete,
    /// Lines removed from the old sequence and replaced by new ones
    Replace,
}

/// A run of lines in the old sequence and the run it maps to in the new one.
///
/// For `Insert` the old range is empty and marks the insertion point; for
/// `Delete` the new range is empty likewise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOp {
    pub kind: OpKind,
    pub old: Range<usize>,
    pub new: Range<usize>,
}

impl LineOp {
    pub fn new(kind: OpKind, old: Range<usize>, new: Range<usize>) -> Self {
        Self { kind, old, new }
    }

    /// Returns true if this op changes anything.
    pub fn is_change(&self) -> bool {
        self.kind != OpKind::Equal
    }
}

/// A single step of the edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    Keep,
    Insert,
    Delete,
}

/// Computes the opcodes turning `old` into `new`.
///
/// Identical inputs produce a single `Equal` op (or nothing when both are
/// empty).
pub fn diff_lines(old: &[&str], new: &[&str]) -> Vec<LineOp> {
    fold_edits(&shortest_edit(old, new))
}

/// Finds a shortest edit script in linear space.
///
/// Each step trims the common prefix and suffix, then splits the remainder
/// at the middle snake of an optimal path and recurses on both halves.
fn shortest_edit(old: &[&str], new: &[&str]) -> Vec<Edit> {
    let max_d = (old.len() + new.len() + 1) / 2 + 1;
    let mut forward = Frontier::new(max_d);
    let mut backward = Frontier::new(max_d);
    let mut edits = Vec::with_capacity(old.len() + new.len());
    conquer(old, new, &mut forward, &mut backward, &mut edits);
    edits
}

fn conquer(
    old: &[&str],
    new: &[&str],
    forward: &mut Frontier,
    backward: &mut Frontier,
    edits: &mut Vec<Edit>,
) {
    let prefix = common_prefix(old, new);
    let (old, new) = (&old[prefix..], &new[prefix..]);
    let suffix = common_suffix(old, new);
    let (old, new) = (&old[..old.len() - suffix], &new[..new.len() - suffix]);

    edits.extend(iter::repeat(Edit::Keep).take(prefix));
    if old.is_empty() {
        edits.extend(iter::repeat(Edit::Insert).take(new.len()));
    } else if new.is_empty() {
        edits.extend(iter::repeat(Edit::Delete).take(old.len()));
    } else if let Some((x, y)) = middle_snake(old, new, forward, backward) {
        conquer(&old[..x], &new[..y], forward, backward, edits);
        conquer(&old[x..], &new[y..], forward, backward, edits);
    } else {
        edits.extend(iter::repeat(Edit::Delete).take(old.len()));
        edits.extend(iter::repeat(Edit::Insert).take(new.len()));
    }
    edits.extend(iter::repeat(Edit::Keep).take(suffix));
}

/// Furthest x reached on each diagonal `k = x - y`.
struct Frontier {
    v: Vec<usize>,
    offset: isize,
}

impl Frontier {
    fn new(max_d: usize) -> Self {
        Self {
            v: vec![0; 2 * max_d + 3],
            offset: max_d as isize + 1,
        }
    }
}

impl Index<isize> for Frontier {
    type Output = usize;

    fn index(&self, k: isize) -> &usize {
        &self.v[(k + self.offset) as usize]
    }
}

impl IndexMut<isize> for Frontier {
    fn index_mut(&mut self, k: isize) -> &mut usize {
        &mut self.v[(k + self.offset) as usize]
    }
}

/// Runs the search from both ends until the paths overlap and returns a
/// point on an optimal path, never `(0, 0)` or the far corner when both
/// inputs are non-empty and share no prefix or suffix.
///
/// The backward frontier measures x from the end of `old`.
fn middle_snake(
    old: &[&str],
    new: &[&str],
    forward: &mut Frontier,
    backward: &mut Frontier,
) -> Option<(usize, usize)> {
    let (n, m) = (old.len(), new.len());
    let delta = n as isize - m as isize;
    let odd = delta & 1 == 1;
    let max_d = ((n + m + 1) / 2 + 1) as isize;
    forward[1] = 0;
    backward[1] = 0;

    for d in 0..max_d {
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && forward[k - 1] < forward[k + 1]) {
                forward[k + 1]
            } else {
                forward[k - 1] + 1
            };
            let y = (x as isize - k) as usize;
            let (x0, y0) = (x, y);
            if x < n && y < m {
                x += common_prefix(&old[x..], &new[y..]);
            }
            forward[k] = x;
            let overlaps = odd && (k - delta).abs() < d && x + backward[delta - k] >= n;
            if overlaps && x0 <= n && y0 <= m {
                return Some((x0, y0));
            }
        }

        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && backward[k - 1] < backward[k + 1]) {
                backward[k + 1]
            } else {
                backward[k - 1] + 1
            };
            let mut y = (x as isize - k) as usize;
            if x < n && y < m {
                let advance = common_suffix(&old[..n - x], &new[..m - y]);
                x += advance;
                y += advance;
            }
            backward[k] = x;
            let overlaps = !odd && (k - delta).abs() <= d && x + forward[delta - k] >= n;
            if overlaps && x <= n && y <= m {
                return Some((n - x, m - y));
            }
        }
    }

    None
}

fn common_prefix(old: &[&str], new: &[&str]) -> usize {
    old.iter().zip(new).take_while(|(a, b)| a == b).count()
}

fn common_suffix(old: &[&str], new: &[&str]) -> usize {
    old.iter()
        .rev()
        .zip(new.iter().rev())
        .take_while(|(a, b)| a == b)
        .count()
}

/// Folds an edit script into opcodes.
///
/// Consecutive kept lines form one `Equal` op; each maximal run of edits
/// between them becomes a `Delete`, an `Insert`, or a `Replace` when it
/// contains both.
fn fold_edits(edits: &[Edit]) -> Vec<LineOp> {
    let mut ops = Vec::new();
    let (mut i, mut j) = (0, 0);
    let mut pos = 0;

    while pos < edits.len() {
        let (start_i, start_j) = (i, j);
        if edits[pos] == Edit::Keep {
            while pos < edits.len() && edits[pos] == Edit::Keep {
                i += 1;
                j += 1;
                pos += 1;
            }
            ops.push(LineOp::new(OpKind::Equal, start_i..i, start_j..j));
            continue;
        }

        while pos < edits.len() && edits[pos] != Edit::Keep {
            if edits[pos] == Edit::Delete {
                i += 1;
            } else {
                j += 1;
            }
            pos += 1;
        }
        let kind = match (i > start_i, j > start_j) {
            (true, true) => OpKind::Replace,
            (true, false) => OpKind::Delete,
            _ => OpKind::Insert,
        };
        ops.push(LineOp::new(kind, start_i..i, start_j..j));
    }

    ops
}

/// Groups opcodes into hunks with up to `context` unchanged lines around
/// each change.
///
/// Equal runs longer than `2 * context` split hunks. Returns no hunks when
/// nothing changed.
pub fn group_ops(ops: &[LineOp], context: usize) -> Vec<Vec<LineOp>> {
    if !ops.iter().any(LineOp::is_change) {
        return Vec::new();
    }

    let mut ops = ops.to_vec();
    if let Some(first) = ops.first_mut() {
        if first.kind == OpKind::Equal {
            let skip = first.old.len().saturating_sub(context);
            first.old.start += skip;
            first.new.start += skip;
        }
    }
    if let Some(last) = ops.last_mut() {
        if last.kind == OpKind::Equal {
            let keep = last.old.len().min(context);
            last.old.end = last.old.start + keep;
            last.new.end = last.new.start + keep;
        }
    }

    let mut hunks = Vec::new();
    let mut group = Vec::new();
    for op in ops {
        if op.kind == OpKind::Equal && op.old.len() > 2 * context {
            group.push(LineOp::new(
                OpKind::Equal,
                op.old.start..op.old.start + context,
                op.new.start..op.new.start + context,
            ));
            hunks.push(std::mem::take(&mut group));
            group.push(LineOp::new(
                OpKind::Equal,
                op.old.end - context..op.old.end,
                op.new.end - context..op.new.end,
            ));
            continue;
        }
        group.push(op);
    }

    if !(group.len() == 1 && group[0].kind == OpKind::Equal) {
        hunks.push(group);
    }
    hunks
}
