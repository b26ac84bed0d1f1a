//! Locating the block that encloses a cursor line.
//!
//! The locator walks backward from the cursor to the nearest opener, then
//! forward from that opener counting nested openers and closers until the
//! depth returns to zero. Malformed input never fails: a cursor with no
//! opener above it, or an opener that is never closed, both collapse to a
//! single-line range.

use log::{debug, trace};

use crate::lang::{self, BlockKind};

/// Inclusive range of 0-based line indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    pub start: usize,
    pub end: usize,
}

impl BlockRange {
    pub fn single(line: usize) -> Self {
        Self { start: line, end: line }
    }
}

/// A located block together with the kind of its opener. `kind` is `None`
/// when no opener was found and the range is just the cursor line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub kind: Option<BlockKind>,
    pub range: BlockRange,
}

/// Finds the block around `cursor`.
///
/// Returns `None` only when `cursor` is not a valid index into `lines`.
pub fn detect_block<S: AsRef<str>>(lines: &[S], cursor: usize) -> Option<BlockRange> {
    describe_block(lines, cursor).map(|block| block.range)
}

/// Like [`detect_block`], also reporting which opener started the block.
pub fn describe_block<S: AsRef<str>>(lines: &[S], cursor: usize) -> Option<Block> {
    if cursor >= lines.len() {
        trace!("cursor {} out of range for {} lines", cursor, lines.len());
        return None;
    }

    let Some((start, kind)) = find_block_start(lines, cursor) else {
        trace!("no opener at or above line {}", cursor);
        return Some(Block { kind: None, range: BlockRange::single(cursor) });
    };

    let end = match find_block_end(lines, start) {
        Some(end) => end,
        None => {
            debug!("{} block opened at line {} is never closed", kind, start);
            start
        }
    };

    trace!("{} block spans lines {}..={}", kind, start, end);
    Some(Block { kind: Some(kind), range: BlockRange { start, end } })
}

/// Nearest opener at or above `cursor`. Closers passed on the way up are
/// not balanced, so a cursor just below a finished block binds to that
/// block's opener.
fn find_block_start<S: AsRef<str>>(lines: &[S], cursor: usize) -> Option<(usize, BlockKind)> {
    lines[..=cursor]
        .iter()
        .enumerate()
        .rev()
        .find_map(|(i, line)| lang::block_kind(line.as_ref()).map(|kind| (i, kind)))
}

/// Line of the closer that balances the opener at `start`.
fn find_block_end<S: AsRef<str>>(lines: &[S], start: usize) -> Option<usize> {
    let mut depth: u32 = 1;
    for (i, line) in lines.iter().enumerate().skip(start + 1) {
        let line = line.as_ref();
        if lang::is_block_start(line) {
            depth += 1;
        } else if lang::is_block_end(line) {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Joins the lines of `range` with `'\n'`. A reversed range, or one that
/// runs past the last line, yields an empty string.
pub fn block_content<S: AsRef<str>>(lines: &[S], range: BlockRange) -> String {
    if range.start > range.end || range.end >= lines.len() {
        return String::new();
    }
    lines[range.start..=range.end]
        .iter()
        .map(|line| line.as_ref())
        .collect::<Vec<&str>>()
        .join("\n")
}
