//! Project input collection: compiled units and UI documents on disk.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

/// Input files discovered under a project root.
#[derive(Debug, Default)]
pub struct ProjectInputs {
    pub units: Vec<PathBuf>,
    pub resources: Vec<PathBuf>,
}

pub struct InputWalker {
    root: PathBuf,
    unit_dirs: Vec<String>,
    resource_dirs: Vec<String>,
}

impl InputWalker {
    pub fn new(root: &Path, unit_dirs: &[String], resource_dirs: &[String]) -> Self {
        Self {
            root: root.to_path_buf(),
            unit_dirs: unit_dirs.to_vec(),
            resource_dirs: resource_dirs.to_vec(),
        }
    }

    /// Collect `*.scu` under the unit dirs and `*.xml` under the resource
    /// dirs. Paths come back sorted so scan order is deterministic.
    pub fn walk(&self) -> ProjectInputs {
        let mut inputs = ProjectInputs::default();
        for dir in &self.unit_dirs {
            collect(&self.root.join(dir), "scu", &mut inputs.units);
        }
        for dir in &self.resource_dirs {
            collect(&self.root.join(dir), "xml", &mut inputs.resources);
        }
        inputs.units.sort();
        inputs.resources.sort();
        inputs
    }
}

fn collect(dir: &Path, extension: &str, out: &mut Vec<PathBuf>) {
    if !dir.is_dir() {
        return;
    }
    let walker = WalkBuilder::new(dir)
        .hidden(true)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .build();
    for result in walker {
        let entry = match result {
            Ok(e) => e,
            Err(_) => continue,
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.into_path();
        if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            out.push(path);
        }
    }
}
