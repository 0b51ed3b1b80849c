//! Derived record schemas, one JSON object per output line.
//!
//! These are the only shapes the writers ever see. Optional fields use
//! `skip_serializing_if` so the presence/absence distinction carried by the
//! derivation (a source without chunk parts has no size or flag fields at
//! all) survives into the serialized form.

use crate::aggregate::SourceFlags;
use serde::Serialize;

/// One module registry entry.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleEntry {
    pub id: u32,
    pub ident: String,
    pub path: String,
}

/// Whether a module edge is a synchronous or asynchronous import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Sync,
    Async,
}

/// One module dependency edge.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModuleEdge {
    pub from: u32,
    pub to: u32,
    pub kind: EdgeKind,
}

/// One source of a route, with its derived path, status, and stats.
#[derive(Debug, Clone, Serialize)]
pub struct SourceEntry {
    pub route: String,
    pub id: u32,
    pub path: String,
    pub full_path: String,
    /// `null` for roots.
    pub parent_id: Option<u32>,
    pub is_dir: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compressed_size: Option<u64>,
    /// Environment and type flags; absent when the source has no parts.
    #[serde(flatten)]
    pub flags: Option<SourceFlags>,
}

/// One chunk part with its output file resolved to a filename.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkPartEntry {
    pub route: String,
    pub source_id: u32,
    pub output_file: String,
    pub size: u64,
    pub compressed_size: u64,
}

/// One output file with totals over the chunk parts it received.
#[derive(Debug, Clone, Serialize)]
pub struct OutputFileEntry {
    pub route: String,
    pub id: u32,
    pub filename: String,
    pub total_size: u64,
    pub total_compressed_size: u64,
    pub num_parts: u32,
}

/// Whole-route totals.
#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    pub route: String,
    pub total_size: u64,
    pub total_compressed_size: u64,
    pub num_sources: usize,
    pub num_output_files: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_entry_without_stats_omits_fields() {
        let entry = SourceEntry {
            route: "app/page".into(),
            id: 0,
            path: "/x".into(),
            full_path: "/x".into(),
            parent_id: None,
            is_dir: true,
            size: None,
            compressed_size: None,
            flags: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["parent_id"], serde_json::Value::Null);
        assert!(json.get("size").is_none());
        assert!(json.get("client").is_none());
        assert!(json.get("asset").is_none());
    }

    #[test]
    fn test_source_entry_with_stats_flattens_flags() {
        let mut flags = SourceFlags::default();
        flags.client = true;
        flags.js = true;
        let entry = SourceEntry {
            route: "app/page".into(),
            id: 1,
            path: "/y".into(),
            full_path: "/x/y".into(),
            parent_id: Some(0),
            is_dir: false,
            size: Some(30),
            compressed_size: Some(12),
            flags: Some(flags),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["size"], 30);
        assert_eq!(json["client"], true);
        assert_eq!(json["server"], false);
    }

    #[test]
    fn test_edge_kind_serializes_lowercase() {
        let edge = ModuleEdge {
            from: 0,
            to: 1,
            kind: EdgeKind::Sync,
        };
        let json = serde_json::to_value(edge).unwrap();
        assert_eq!(json["kind"], "sync");
        assert_eq!(
            serde_json::to_value(EdgeKind::Async).unwrap(),
            serde_json::Value::String("async".into())
        );
    }
}
