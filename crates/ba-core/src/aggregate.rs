//! Per-source size aggregation and environment classification.
//!
//! Each pass here is a pure fold over one source's associated chunk parts,
//! producing an immutable [`SourceStats`] (or nothing, when the source has no
//! parts). "No parts" and "zero bytes" are distinct conditions and stay
//! distinct all the way to the serialized output.

use ba_format::{ChunkPartRecord, OutputFileRecord};
use serde::Serialize;

/// Placeholder filename for an output-file index with no backing record.
pub const UNKNOWN_OUTPUT_FILE: &str = "<unknown>";

/// Filename prefix marking a client-filesystem artifact.
const CLIENT_PREFIX: &str = "static/";
/// Filename prefix marking a project-traced artifact.
const TRACED_PREFIX: &str = "traced/";

/// Environment and artifact-type flags for one source.
///
/// Classification of a single filename sets exactly one environment flag
/// (client, traced, or server) and exactly one type flag (js, css, json, or
/// asset); flags from multiple chunk parts accumulate with logical OR.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SourceFlags {
    pub client: bool,
    pub server: bool,
    pub traced: bool,
    pub js: bool,
    pub css: bool,
    pub json: bool,
    pub asset: bool,
}

impl SourceFlags {
    /// Classify one output filename.
    pub fn classify(filename: &str) -> Self {
        let mut flags = Self::default();
        if filename.starts_with(CLIENT_PREFIX) {
            flags.client = true;
        } else if filename.starts_with(TRACED_PREFIX) {
            flags.traced = true;
        } else {
            flags.server = true;
        }
        if filename.ends_with(".js") {
            flags.js = true;
        } else if filename.ends_with(".css") {
            flags.css = true;
        } else if filename.ends_with(".json") {
            flags.json = true;
        } else {
            flags.asset = true;
        }
        flags
    }

    /// Accumulate another classification into this one.
    pub fn merge(&mut self, other: Self) {
        self.client |= other.client;
        self.server |= other.server;
        self.traced |= other.traced;
        self.js |= other.js;
        self.css |= other.css;
        self.json |= other.json;
        self.asset |= other.asset;
    }
}

/// Aggregated output contribution of one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceStats {
    pub size: u64,
    pub compressed_size: u64,
    pub flags: SourceFlags,
}

/// Resolve an output-file index to its filename, substituting the
/// placeholder when the record is missing.
pub fn output_filename(output_files: &[OutputFileRecord], index: u32) -> &str {
    output_files
        .get(index as usize)
        .map(|f| f.filename.as_str())
        .unwrap_or(UNKNOWN_OUTPUT_FILE)
}

/// Fold one source's chunk parts into its stats.
///
/// Returns `None` for a source with no associated parts. A part index with
/// no backing record contributes zero bytes and classifies the placeholder
/// filename (server + asset).
pub fn aggregate_source(
    part_indices: &[u32],
    chunk_parts: &[ChunkPartRecord],
    output_files: &[OutputFileRecord],
) -> Option<SourceStats> {
    if part_indices.is_empty() {
        return None;
    }
    let stats = part_indices.iter().fold(
        SourceStats {
            size: 0,
            compressed_size: 0,
            flags: SourceFlags::default(),
        },
        |mut stats, &index| {
            match chunk_parts.get(index as usize) {
                Some(part) => {
                    stats.size += part.size;
                    stats.compressed_size += part.compressed_size;
                    stats
                        .flags
                        .merge(SourceFlags::classify(output_filename(
                            output_files,
                            part.output_file_index,
                        )));
                }
                None => {
                    stats
                        .flags
                        .merge(SourceFlags::classify(UNKNOWN_OUTPUT_FILE));
                }
            }
            stats
        },
    );
    Some(stats)
}

/// A source is a directory iff its child-edge list is non-empty. Roots get
/// no special treatment.
pub fn is_directory(children: &[u32]) -> bool {
    !children.is_empty()
}
