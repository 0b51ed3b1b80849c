//! No-mock container decode tests for ba-format.
//!
//! Builds real container buffers byte-by-byte (length prefix, JSON header,
//! CSR tables in the binary segment) and exercises the full decode path:
//! - Header/segment split with descriptor offsets into the segment
//! - Multiple CSR tables at distinct offsets
//! - The global (module) and route (source) header subsets

use ba_format::{csr, Container, FormatError, TableRef};
use serde_json::json;

/// Assemble a container from a header value and pre-encoded CSR tables,
/// returning the buffer plus the descriptor for each table.
fn build_container(mut header: serde_json::Value, tables: &[(&str, Vec<Vec<u32>>)]) -> Vec<u8> {
    let mut segment = Vec::new();
    for (field, lists) in tables {
        let table = json!({ "offset": segment.len() as u32 });
        header[*field] = table;
        segment.extend_from_slice(&csr::encode(lists));
    }

    let header_bytes = serde_json::to_vec(&header).unwrap();
    let mut bytes = (header_bytes.len() as u32).to_be_bytes().to_vec();
    bytes.extend_from_slice(&header_bytes);
    bytes.extend_from_slice(&segment);
    bytes
}

#[test]
fn test_module_container_decodes_dependency_tables() {
    let bytes = build_container(
        json!({
            "modules": [
                {"id": 0, "ident": "a", "path": "/a"},
                {"id": 1, "ident": "b", "path": "/b"},
                {"id": 2, "ident": "c", "path": "/c"}
            ]
        }),
        &[
            ("module_dependencies", vec![vec![1, 2], vec![], vec![]]),
            ("module_async_dependencies", vec![vec![], vec![2], vec![]]),
        ],
    );

    let container = Container::parse(&bytes).unwrap();
    let header = container.header();
    assert_eq!(header.modules.len(), 3);
    assert_eq!(header.modules[1].ident, "b");

    let segment = container.segment();
    let sync = csr::all_edges(header.module_dependencies.as_ref(), &segment).unwrap();
    assert_eq!(sync, vec![vec![1, 2], vec![], vec![]]);
    let async_edges =
        csr::all_edges(header.module_async_dependencies.as_ref(), &segment).unwrap();
    assert_eq!(async_edges[1], vec![2]);
}

#[test]
fn test_route_container_decodes_source_tables() {
    let bytes = build_container(
        json!({
            "sources": [
                {"id": 0, "path": "/app"},
                {"id": 1, "path": "/page.js", "parent_id": 0}
            ],
            "chunk_parts": [
                {"source_id": 1, "output_file_index": 0, "size": 10, "compressed_size": 4}
            ],
            "output_files": [{"filename": "static/page.js"}]
        }),
        &[
            ("source_chunk_parts", vec![vec![], vec![0]]),
            ("source_children", vec![vec![1], vec![]]),
        ],
    );

    let container = Container::parse(&bytes).unwrap();
    let header = container.header();
    let segment = container.segment();

    assert_eq!(
        csr::edges_at(header.source_chunk_parts.as_ref(), &segment, 1).unwrap(),
        vec![0]
    );
    assert_eq!(
        csr::edges_at(header.source_children.as_ref(), &segment, 0).unwrap(),
        vec![1]
    );
    assert_eq!(header.chunk_parts[0].size, 10);
    assert_eq!(header.output_files[0].filename, "static/page.js");
}

#[test]
fn test_descriptor_pointing_past_segment_is_truncated() {
    let bytes = build_container(json!({}), &[]);
    let container = Container::parse(&bytes).unwrap();
    let bogus = TableRef { offset: 4096 };
    let result = csr::all_edges(Some(&bogus), &container.segment());
    assert!(matches!(result, Err(FormatError::Truncated { .. })));
}

#[test]
fn test_header_only_container() {
    // No binary segment at all; absent descriptors decode as empty.
    let bytes = build_container(json!({"sources": [{"id": 0, "path": "/x"}]}), &[]);
    let container = Container::parse(&bytes).unwrap();
    let header = container.header();
    assert!(container.segment().is_empty());
    assert!(
        csr::edges_at(header.source_children.as_ref(), &container.segment(), 0)
            .unwrap()
            .is_empty()
    );
}
