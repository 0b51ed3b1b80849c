//! Fuzz target for CSR table decoding over arbitrary segments.
//!
//! Any descriptor offset against any segment must either decode or return a
//! truncation error; no reads past the segment, no panics.

#![no_main]

use ba_format::{csr, Container, TableRef};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Wrap the raw bytes as the binary segment of an empty-header container.
    let mut bytes = 2u32.to_be_bytes().to_vec();
    bytes.extend_from_slice(b"{}");
    bytes.extend_from_slice(data);
    let container = match Container::parse(&bytes) {
        Ok(container) => container,
        Err(_) => return,
    };

    let table = TableRef { offset: 0 };
    let _ = csr::all_edges(Some(&table), &container.segment());
    let _ = csr::edges_at(Some(&table), &container.segment(), 3);
});
