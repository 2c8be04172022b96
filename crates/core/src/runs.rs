//! Groups consecutive list items into runs before rendering.

use crate::block::{ContentBlock, ListKind};

/// A renderable unit: one standalone block or a whole list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A block rendered on its own.
    Single {
        /// Position of the block in the input.
        index: usize,
        /// The block.
        block: &'a ContentBlock,
    },
    /// A maximal run of list items of one kind.
    List {
        /// Position of the first item in the input.
        start: usize,
        /// Kind shared by every item.
        kind: ListKind,
        /// The items, in input order.
        items: &'a [ContentBlock],
    },
}

/// Splits `blocks` into segments, preserving order. Adjacent list items share
/// a segment only when their kinds match.
pub fn group_runs(blocks: &[ContentBlock]) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut start = 0;

    for chunk in blocks.chunk_by(|a, b| a.list_kind().is_some() && a.list_kind() == b.list_kind())
    {
        match chunk[0].list_kind() {
            Some(kind) => segments.push(Segment::List {
                start,
                kind,
                items: chunk,
            }),
            None => segments.push(Segment::Single {
                index: start,
                block: &chunk[0],
            }),
        }
        start += chunk.len();
    }

    segments
}
