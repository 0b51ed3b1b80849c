//! Top-level processing loop: discover, derive, write.
//!
//! Routes are processed strictly sequentially and independently; everything
//! derived from one container is written out and dropped before the next
//! container is read. A malformed container fails its own route only.

use crate::derive::{ModuleGraph, RouteAnalysis};
use crate::discover::{self, ContainerKind};
use crate::error::Result;
use crate::writer::{categories, CategoryWriter};
use ba_format::Container;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Outcome of one run over a scan root.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub num_modules: usize,
    pub num_module_edges: usize,
    pub routes_ok: usize,
    /// Route names that failed to decode or derive.
    pub routes_failed: Vec<String>,
}

struct CategoryWriters {
    modules: CategoryWriter,
    module_edges: CategoryWriter,
    sources: CategoryWriter,
    chunk_parts: CategoryWriter,
    output_files: CategoryWriter,
    routes: CategoryWriter,
}

impl CategoryWriters {
    fn create(dir: &Path) -> Result<Self> {
        Ok(Self {
            modules: CategoryWriter::create(dir, categories::MODULES)?,
            module_edges: CategoryWriter::create(dir, categories::MODULE_EDGES)?,
            sources: CategoryWriter::create(dir, categories::SOURCES)?,
            chunk_parts: CategoryWriter::create(dir, categories::CHUNK_PARTS)?,
            output_files: CategoryWriter::create(dir, categories::OUTPUT_FILES)?,
            routes: CategoryWriter::create(dir, categories::ROUTES)?,
        })
    }

    fn finish(self) -> Result<()> {
        self.modules.finish()?;
        self.module_edges.finish()?;
        self.sources.finish()?;
        self.chunk_parts.finish()?;
        self.output_files.finish()?;
        self.routes.finish()?;
        Ok(())
    }
}

/// Process every container under `input`, writing category files to `out`.
///
/// `out` is created if missing. Per-route failures are logged and recorded
/// in the report; only discovery and output I/O errors abort the run.
pub fn process_all(input: &Path, out: &Path) -> Result<RunReport> {
    fs::create_dir_all(out)?;
    let containers = discover::find_containers(input)?;
    info!(containers = containers.len(), input = %input.display(), "Starting analysis run");

    let mut writers = CategoryWriters::create(out)?;
    let mut report = RunReport {
        generated_at: Utc::now(),
        num_modules: 0,
        num_module_edges: 0,
        routes_ok: 0,
        routes_failed: Vec::new(),
    };

    for container_file in containers {
        let bytes = fs::read(&container_file.path)?;
        match &container_file.kind {
            ContainerKind::Modules => {
                match Container::parse(&bytes)
                    .map_err(crate::error::Error::from)
                    .and_then(|c| ModuleGraph::derive(&c))
                {
                    Ok(graph) => {
                        report.num_modules = graph.len();
                        writers.modules.write_all(graph.module_entries())?;
                        for edge in graph.module_edges() {
                            writers.module_edges.write(&edge)?;
                            report.num_module_edges += 1;
                        }
                    }
                    Err(error) => {
                        warn!(path = %container_file.path.display(), %error, "Module container failed");
                    }
                }
            }
            ContainerKind::Route(route) => {
                match Container::parse(&bytes)
                    .map_err(crate::error::Error::from)
                    .and_then(|c| RouteAnalysis::derive(route.clone(), &c))
                {
                    Ok(analysis) => {
                        writers.sources.write_all(analysis.source_entries())?;
                        writers.chunk_parts.write_all(analysis.chunk_part_entries())?;
                        writers
                            .output_files
                            .write_all(analysis.output_file_entries())?;
                        writers.routes.write(&analysis.summary())?;
                        report.routes_ok += 1;
                    }
                    Err(error) => {
                        warn!(route = %route, %error, "Route container failed");
                        report.routes_failed.push(route.clone());
                    }
                }
            }
        }
    }

    writers.finish()?;
    fs::write(out.join("run.json"), serde_json::to_vec_pretty(&report)?)?;

    info!(
        routes_ok = report.routes_ok,
        routes_failed = report.routes_failed.len(),
        modules = report.num_modules,
        "Analysis run complete"
    );
    Ok(report)
}
