//! Bundle-analysis derivation engine.
//!
//! Takes parsed [`ba_format::Container`]s and re-derives relational views:
//! full hierarchical paths for every source, per-source size aggregates,
//! environment/type classification flags, and directory status, plus the
//! global module registry with its dependency edges. The derived views are
//! exposed as lazy per-category record iterators; [`writer::CategoryWriter`]
//! turns them into one-JSON-object-per-line files, and [`driver`] wires the
//! whole pipeline together for the `ba-core` binary.

pub mod aggregate;
pub mod derive;
pub mod discover;
pub mod driver;
pub mod error;
pub mod paths;
pub mod records;
pub mod writer;

pub use derive::{ModuleGraph, RouteAnalysis};
pub use driver::{process_all, RunReport};
pub use error::{Error, Result};
