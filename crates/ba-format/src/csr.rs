//! CSR adjacency table codec.
//!
//! A table at `offset` is `[u32 count N][N x u32 cumulative offsets][flat u32
//! edge targets]`, all big-endian. Node `i`'s edge list spans
//! `[cumulative[i-1], cumulative[i])` into the flat array, with
//! `cumulative[-1] = 0`. The cumulative array gives O(1) access to any list's
//! bounds; decoding costs O(edges touched), never O(total edges).

use crate::container::BinarySegment;
use crate::error::Result;
use crate::header::TableRef;

/// Decode the edge list of one node.
///
/// Returns the empty list when the table descriptor is absent or `index` is
/// outside `[0, N)` — the format does not distinguish "no entry" from "empty
/// list", and neither is an error.
pub fn edges_at(
    table: Option<&TableRef>,
    segment: &BinarySegment<'_>,
    index: usize,
) -> Result<Vec<u32>> {
    let table = match table {
        Some(table) => table,
        None => return Ok(Vec::new()),
    };
    let base = table.offset as usize;
    let count = segment.read_u32(base)? as usize;
    if index >= count {
        return Ok(Vec::new());
    }

    let cumulative_start = base + 4;
    let prev = if index == 0 {
        0
    } else {
        segment.read_u32(cumulative_start + (index - 1) * 4)? as usize
    };
    let end = segment.read_u32(cumulative_start + index * 4)? as usize;

    let data_start = base + 4 + 4 * count;
    segment.read_u32_slice(data_start + prev * 4, end.saturating_sub(prev))
}

/// Decode every node's edge list, preserving index order.
pub fn all_edges(
    table: Option<&TableRef>,
    segment: &BinarySegment<'_>,
) -> Result<Vec<Vec<u32>>> {
    let table = match table {
        Some(table) => table,
        None => return Ok(Vec::new()),
    };
    let count = segment.read_u32(table.offset as usize)? as usize;
    // Validate the cumulative array before trusting `count` as a capacity
    // hint; a corrupt count fails here without allocating.
    segment.read_u32_slice(table.offset as usize + 4, count)?;
    let mut lists = Vec::with_capacity(count);
    for index in 0..count {
        lists.push(edges_at(Some(table), segment, index)?);
    }
    Ok(lists)
}

/// Encode a list-of-lists as a CSR table.
///
/// Writer counterpart of [`edges_at`]/[`all_edges`]; the returned bytes are a
/// complete table suitable for appending to a binary segment.
pub fn encode(lists: &[Vec<u32>]) -> Vec<u8> {
    let total: usize = lists.iter().map(Vec::len).sum();
    let mut bytes = Vec::with_capacity(4 + 4 * lists.len() + 4 * total);
    bytes.extend_from_slice(&(lists.len() as u32).to_be_bytes());

    let mut cumulative = 0u32;
    for list in lists {
        cumulative += list.len() as u32;
        bytes.extend_from_slice(&cumulative.to_be_bytes());
    }
    for list in lists {
        for edge in list {
            bytes.extend_from_slice(&edge.to_be_bytes());
        }
    }
    bytes
}
