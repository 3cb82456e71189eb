//! Delivery of generated files into an export directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use topogen_common::source::DeliverySink;
use tracing::{debug, info};

pub struct DirectoryExport {
    dir: PathBuf,
}

impl DirectoryExport {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DeliverySink for DirectoryExport {
    fn deliver(&self, artifacts: &[PathBuf]) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))?;

        let mut copied = 0;
        for artifact in artifacts {
            let Some(name) = artifact.file_name() else {
                continue;
            };
            let target = self.dir.join(name);

            // Copying a file onto itself truncates it.
            if same_file(artifact, &target) {
                debug!("{} is already in {}", artifact.display(), self.dir.display());
                continue;
            }

            std::fs::copy(artifact, &target)
                .with_context(|| format!("copying {} to {}", artifact.display(), target.display()))?;
            copied += 1;
        }

        info!("Copied {} file(s) to {}", copied, self.dir.display());
        Ok(())
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
