//! Huffman tree construction and code assignment.
//!
//! The tree only exists while a column is being compressed: it is built from
//! value frequencies, walked once to produce the code table, then dropped.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use crate::bitpack::Code;
use crate::error::CodecError;
use crate::value::ColumnValue;
use crate::Result;

/// Huffman tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node<D> {
    Leaf {
        value: D,
        freq: usize,
    },
    Internal {
        freq: usize,
        left: Box<Node<D>>,
        right: Box<Node<D>>,
    },
}

impl<D> Node<D> {
    pub(crate) fn freq(&self) -> usize {
        match self {
            Node::Leaf { freq, .. } | Node::Internal { freq, .. } => *freq,
        }
    }
}

/// Heap entry ordered so that `BinaryHeap` pops the lowest frequency first,
/// and among equal frequencies the entry queued first.
struct Queued<D> {
    freq: usize,
    seq: usize,
    node: Node<D>,
}

impl<D> PartialEq for Queued<D> {
    fn eq(&self, other: &Self) -> bool {
        self.freq == other.freq && self.seq == other.seq
    }
}

impl<D> Eq for Queued<D> {}

impl<D> Ord for Queued<D> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-priority queue
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<D> PartialOrd for Queued<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Count each distinct value, in order of first occurrence.
pub(crate) fn frequencies<D: ColumnValue>(column: &[D]) -> Vec<(D, usize)> {
    let mut slots: FxHashMap<&D, usize> = FxHashMap::default();
    let mut counts: Vec<(D, usize)> = Vec::new();
    for value in column {
        match slots.get(value) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(value, counts.len());
                counts.push((value.clone(), 1));
            }
        }
    }
    counts
}

/// Build the Huffman tree for `column`. Returns `None` for an empty column.
pub(crate) fn build<D: ColumnValue>(column: &[D]) -> Option<Node<D>> {
    let mut heap: BinaryHeap<Queued<D>> = frequencies(column)
        .into_iter()
        .enumerate()
        .map(|(seq, (value, freq))| Queued {
            freq,
            seq,
            node: Node::Leaf { value, freq },
        })
        .collect();
    let mut seq = heap.len();

    loop {
        let left = heap.pop()?;
        let Some(right) = heap.pop() else {
            return Some(left.node);
        };
        let freq = left.node.freq() + right.node.freq();
        heap.push(Queued {
            freq,
            seq,
            node: Node::Internal {
                freq,
                left: Box::new(left.node),
                right: Box::new(right.node),
            },
        });
        seq += 1;
    }
}

/// Walk the tree and assign each leaf its root-to-leaf path as a code
/// (left edge `0`, right edge `1`).
///
/// A tree that is a single leaf gets the one-bit code `0`. Fails with
/// [`CodecError::CodeTooLong`] if any code would exceed `max_len` bits.
pub(crate) fn assign_codes<D: ColumnValue>(
    root: &Node<D>,
    max_len: usize,
) -> Result<FxHashMap<D, Code>> {
    let mut table = FxHashMap::default();
    match root {
        Node::Leaf { value, .. } => {
            let code = Code::EMPTY
                .push(false)
                .ok_or(CodecError::CodeTooLong {
                    length: 1,
                    block_width: max_len,
                })?;
            table.insert(value.clone(), code);
        }
        Node::Internal { .. } => walk(root, Code::EMPTY, max_len, &mut table)?,
    }
    Ok(table)
}

fn walk<D: ColumnValue>(
    node: &Node<D>,
    prefix: Code,
    max_len: usize,
    table: &mut FxHashMap<D, Code>,
) -> Result<()> {
    match node {
        Node::Leaf { value, .. } => {
            table.insert(value.clone(), prefix);
        }
        Node::Internal { left, right, .. } => {
            let too_long = CodecError::CodeTooLong {
                length: prefix.len() + 1,
                block_width: max_len,
            };
            let (Some(left_code), Some(right_code)) = (prefix.push(false), prefix.push(true))
            else {
                return Err(too_long);
            };
            if left_code.len() > max_len {
                return Err(too_long);
            }
            walk(left, left_code, max_len, table)?;
            walk(right, right_code, max_len, table)?;
        }
    }
    Ok(())
}
