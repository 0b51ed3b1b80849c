//! Bundle-analysis container format.
//!
//! A `.bundle-analysis` container is a single byte buffer holding one JSON
//! header and one packed binary segment:
//!
//! ```text
//! [u32 BE header length L][L bytes UTF-8 JSON header][binary segment ...]
//! ```
//!
//! The header carries flat record tables (modules, sources, chunk parts,
//! output files) plus table descriptors: byte offsets into the binary segment
//! where CSR-encoded adjacency tables begin. A CSR table packs many
//! variable-length integer lists as one cumulative-offset array plus one flat
//! value array, so any list's bounds are an O(1) lookup:
//!
//! ```text
//! [u32 BE count N][N x u32 BE cumulative offsets][flat u32 BE edge targets]
//! ```
//!
//! # Example
//!
//! ```
//! use ba_format::{csr, Container};
//!
//! let header = br#"{"modules":[],"sources":[]}"#;
//! let mut bytes = (header.len() as u32).to_be_bytes().to_vec();
//! bytes.extend_from_slice(header);
//!
//! let container = Container::parse(&bytes).unwrap();
//! assert!(container.header().modules.is_empty());
//! ```

pub mod container;
pub mod csr;
pub mod error;
pub mod header;

pub use container::{BinarySegment, Container};
pub use error::{FormatError, Result};
pub use header::{
    ChunkPartRecord, Header, ModuleRecord, OutputFileRecord, SourceRecord, TableRef,
};
