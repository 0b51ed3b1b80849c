//! Hierarchical path reconstruction over the source forest.
//!
//! Each source stores only its own path fragment plus a parent pointer; the
//! full path is the concatenation of every fragment from the root down (the
//! fragments already carry their leading separators, so nothing is inserted
//! between them). Resolution is memoized in an array-indexed table sized to
//! the source count, with an explicit in-progress marker per slot so a
//! corrupt file with a cyclic parent chain fails instead of looping.

use crate::error::{Error, Result};
use ba_format::SourceRecord;

#[derive(Debug, Clone)]
enum Slot {
    Unresolved,
    InProgress,
    Done(String),
}

/// Resolve the full path of every source, in index order.
///
/// A `parent_id` that does not index into `sources` is treated as absent:
/// the source resolves as a root. Each slot is computed at most once.
pub fn resolve_paths(sources: &[SourceRecord]) -> Result<Vec<String>> {
    let mut memo = vec![Slot::Unresolved; sources.len()];
    for index in 0..sources.len() {
        resolve_chain(sources, &mut memo, index)?;
    }
    Ok(memo
        .into_iter()
        .map(|slot| match slot {
            Slot::Done(path) => path,
            // resolve_chain leaves every visited slot Done on success.
            _ => String::new(),
        })
        .collect())
}

fn parent_of(sources: &[SourceRecord], index: usize) -> Option<usize> {
    sources[index]
        .parent_id
        .map(|p| p as usize)
        .filter(|p| *p < sources.len())
}

/// Walk the parent chain from `start`, then fill in every slot on the way
/// back down. Uses an explicit chain instead of the call stack.
fn resolve_chain(sources: &[SourceRecord], memo: &mut [Slot], start: usize) -> Result<()> {
    if matches!(memo[start], Slot::Done(_)) {
        return Ok(());
    }

    let mut chain = Vec::new();
    let mut index = start;
    loop {
        if matches!(memo[index], Slot::Done(_)) {
            break;
        }
        if matches!(memo[index], Slot::InProgress) {
            return Err(Error::CyclicPath {
                source_id: sources[index].id,
            });
        }
        memo[index] = Slot::InProgress;
        chain.push(index);
        match parent_of(sources, index) {
            Some(parent) => index = parent,
            None => break,
        }
    }

    for &node in chain.iter().rev() {
        let mut path = match parent_of(sources, node) {
            Some(parent) => match &memo[parent] {
                Slot::Done(prefix) => prefix.clone(),
                _ => String::new(),
            },
            None => String::new(),
        };
        path.push_str(&sources[node].path);
        memo[node] = Slot::Done(path);
    }
    Ok(())
}
