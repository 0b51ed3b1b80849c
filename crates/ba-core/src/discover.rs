//! Container discovery: recursive scan for `.bundle-analysis` files.

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Extension (with dot) of container files.
pub const CONTAINER_SUFFIX: &str = ".bundle-analysis";

/// File name of the global module-registry container.
pub const MODULES_CONTAINER: &str = "modules.bundle-analysis";

/// What a discovered container holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerKind {
    /// The global module registry.
    Modules,
    /// One route's source tables; the payload is the route name.
    Route(String),
}

/// One container file found under the scan root.
#[derive(Debug, Clone)]
pub struct ContainerFile {
    pub path: PathBuf,
    pub kind: ContainerKind,
}

/// Recursively collect container files under `root`, sorted by path for
/// deterministic processing order. Symlinks are not followed.
///
/// The route name is the root-relative path with the container suffix
/// stripped, forward slashes on every platform.
pub fn find_containers(root: &Path) -> Result<Vec<ContainerFile>> {
    let mut containers = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !name.ends_with(CONTAINER_SUFFIX) {
            continue;
        }
        let kind = if name == MODULES_CONTAINER {
            ContainerKind::Modules
        } else {
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            let route = forward_slash(relative);
            let route = route
                .strip_suffix(CONTAINER_SUFFIX)
                .unwrap_or(&route)
                .to_string();
            ContainerKind::Route(route)
        };
        containers.push(ContainerFile {
            path: entry.path().to_path_buf(),
            kind,
        });
    }
    containers.sort_by(|a, b| a.path.cmp(&b.path));

    debug!(root = %root.display(), found = containers.len(), "Container scan complete");
    Ok(containers)
}

fn forward_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
