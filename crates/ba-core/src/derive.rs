//! Derivation pipelines: from a parsed container to per-category records.
//!
//! `derive` runs every pass once over immutable inputs (paths, stats,
//! directory bits, per-output-file totals) and keeps the results; the
//! per-category accessors are lazy, finite iterators over those results, so
//! any writer discipline can consume them without touching decode logic.

use crate::aggregate::{self, SourceStats};
use crate::error::Result;
use crate::paths;
use crate::records::{
    ChunkPartEntry, EdgeKind, ModuleEdge, ModuleEntry, OutputFileEntry, RouteSummary,
    SourceEntry,
};
use ba_format::{csr, ChunkPartRecord, Container, OutputFileRecord, SourceRecord};
use tracing::debug;

/// Derived views of one route container.
///
/// Owns everything it needs; the borrowed container buffer can be dropped as
/// soon as `derive` returns, and nothing here is shared with the next route.
pub struct RouteAnalysis {
    route: String,
    sources: Vec<SourceRecord>,
    chunk_parts: Vec<ChunkPartRecord>,
    output_files: Vec<OutputFileRecord>,
    full_paths: Vec<String>,
    stats: Vec<Option<SourceStats>>,
    dirs: Vec<bool>,
    /// (total_size, total_compressed_size, num_parts) per output file.
    output_totals: Vec<(u64, u64, u32)>,
}

impl RouteAnalysis {
    /// Run every derivation pass over one route's container.
    pub fn derive(route: impl Into<String>, container: &Container<'_>) -> Result<Self> {
        let route = route.into();
        let header = container.header();
        let segment = container.segment();

        let full_paths = paths::resolve_paths(&header.sources)?;

        let mut stats = Vec::with_capacity(header.sources.len());
        let mut dirs = Vec::with_capacity(header.sources.len());
        for index in 0..header.sources.len() {
            let parts = csr::edges_at(header.source_chunk_parts.as_ref(), &segment, index)?;
            stats.push(aggregate::aggregate_source(
                &parts,
                &header.chunk_parts,
                &header.output_files,
            ));
            let children =
                csr::edges_at(header.source_children.as_ref(), &segment, index)?;
            dirs.push(aggregate::is_directory(&children));
        }

        let mut output_totals = vec![(0u64, 0u64, 0u32); header.output_files.len()];
        for part in &header.chunk_parts {
            if let Some(totals) = output_totals.get_mut(part.output_file_index as usize) {
                totals.0 += part.size;
                totals.1 += part.compressed_size;
                totals.2 += 1;
            }
        }

        debug!(
            route = %route,
            sources = header.sources.len(),
            chunk_parts = header.chunk_parts.len(),
            output_files = header.output_files.len(),
            "Route derived"
        );

        Ok(Self {
            route,
            sources: header.sources.clone(),
            chunk_parts: header.chunk_parts.clone(),
            output_files: header.output_files.clone(),
            full_paths,
            stats,
            dirs,
            output_totals,
        })
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    /// One entry per source, in index order.
    pub fn source_entries(&self) -> impl Iterator<Item = SourceEntry> + '_ {
        self.sources.iter().enumerate().map(|(index, source)| {
            let stats = &self.stats[index];
            SourceEntry {
                route: self.route.clone(),
                id: source.id,
                path: source.path.clone(),
                full_path: self.full_paths[index].clone(),
                parent_id: source.parent_id,
                is_dir: self.dirs[index],
                size: stats.as_ref().map(|s| s.size),
                compressed_size: stats.as_ref().map(|s| s.compressed_size),
                flags: stats.as_ref().map(|s| s.flags),
            }
        })
    }

    /// One entry per chunk part, in table order.
    pub fn chunk_part_entries(&self) -> impl Iterator<Item = ChunkPartEntry> + '_ {
        self.chunk_parts.iter().map(|part| ChunkPartEntry {
            route: self.route.clone(),
            source_id: part.source_id,
            output_file: aggregate::output_filename(&self.output_files, part.output_file_index)
                .to_string(),
            size: part.size,
            compressed_size: part.compressed_size,
        })
    }

    /// One entry per output file, with chunk-part totals.
    pub fn output_file_entries(&self) -> impl Iterator<Item = OutputFileEntry> + '_ {
        self.output_files
            .iter()
            .zip(&self.output_totals)
            .enumerate()
            .map(|(index, (file, totals))| OutputFileEntry {
                route: self.route.clone(),
                id: index as u32,
                filename: file.filename.clone(),
                total_size: totals.0,
                total_compressed_size: totals.1,
                num_parts: totals.2,
            })
    }

    /// Whole-route totals, summed over every chunk part.
    pub fn summary(&self) -> RouteSummary {
        let (total_size, total_compressed_size) = self
            .chunk_parts
            .iter()
            .fold((0u64, 0u64), |(size, compressed), part| {
                (size + part.size, compressed + part.compressed_size)
            });
        RouteSummary {
            route: self.route.clone(),
            total_size,
            total_compressed_size,
            num_sources: self.sources.len(),
            num_output_files: self.output_files.len(),
        }
    }
}

/// Derived views of the global module-registry container.
pub struct ModuleGraph {
    modules: Vec<ba_format::ModuleRecord>,
    sync_edges: Vec<Vec<u32>>,
    async_edges: Vec<Vec<u32>>,
}

impl ModuleGraph {
    /// Decode the module registry and both dependency tables.
    pub fn derive(container: &Container<'_>) -> Result<Self> {
        let header = container.header();
        let segment = container.segment();
        let sync_edges = csr::all_edges(header.module_dependencies.as_ref(), &segment)?;
        let async_edges =
            csr::all_edges(header.module_async_dependencies.as_ref(), &segment)?;

        debug!(
            modules = header.modules.len(),
            sync_lists = sync_edges.len(),
            async_lists = async_edges.len(),
            "Module graph derived"
        );

        Ok(Self {
            modules: header.modules.clone(),
            sync_edges,
            async_edges,
        })
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// One entry per module, in registry order.
    pub fn module_entries(&self) -> impl Iterator<Item = ModuleEntry> + '_ {
        self.modules.iter().map(|module| ModuleEntry {
            id: module.id,
            ident: module.ident.clone(),
            path: module.path.clone(),
        })
    }

    /// Every dependency edge: sync edges in table order, then async.
    pub fn module_edges(&self) -> impl Iterator<Item = ModuleEdge> + '_ {
        fn edges(
            lists: &[Vec<u32>],
            kind: EdgeKind,
        ) -> impl Iterator<Item = ModuleEdge> + '_ {
            lists.iter().enumerate().flat_map(move |(from, targets)| {
                targets.iter().map(move |&to| ModuleEdge {
                    from: from as u32,
                    to,
                    kind,
                })
            })
        }
        edges(&self.sync_edges, EdgeKind::Sync).chain(edges(&self.async_edges, EdgeKind::Async))
    }
}
