//! Typed views of the container's JSON header.
//!
//! The header is deliberately under-validated: every table is optional and
//! defaults to empty, because a global (module-registry) container and a
//! per-route container populate disjoint subsets of these fields. Decoding
//! only checks what is needed to locate the tables a pass consumes.

use serde::{Deserialize, Serialize};

/// Byte offset of a CSR table within the binary segment.
///
/// Header fields of this type are optional; an absent descriptor means
/// "no table", which every consumer treats as "all lists empty".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    /// Offset relative to the start of the binary segment.
    pub offset: u32,
}

/// One entry of the flat module registry; its index equals `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub id: u32,
    pub ident: String,
    pub path: String,
}

/// One node of a route's source forest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRecord {
    pub id: u32,
    /// Path fragment; expected to already carry its leading separator.
    pub path: String,
    /// Index of the parent source, or `None` for a root.
    #[serde(default)]
    pub parent_id: Option<u32>,
}

/// One production unit linking a source to an output artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkPartRecord {
    pub source_id: u32,
    pub output_file_index: u32,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub compressed_size: u64,
}

/// One emitted output file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputFileRecord {
    pub filename: String,
}

/// Parsed container header.
///
/// Field layout matches the on-disk JSON; all tables default to empty so a
/// container only carrying the module side (or only the source side) parses
/// cleanly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Header {
    /// Module registry (global container only).
    pub modules: Vec<ModuleRecord>,
    /// CSR table: module index -> synchronously imported module indices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_dependencies: Option<TableRef>,
    /// CSR table: module index -> asynchronously imported module indices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_async_dependencies: Option<TableRef>,

    /// Source forest (route containers only).
    pub sources: Vec<SourceRecord>,
    pub chunk_parts: Vec<ChunkPartRecord>,
    pub output_files: Vec<OutputFileRecord>,
    /// CSR table: source index -> associated chunk-part indices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_chunk_parts: Option<TableRef>,
    /// CSR table: source index -> child source indices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_children: Option<TableRef>,
}
