use std::path::{Path, PathBuf};
use std::process::Command;

use topogen_common::error::{Result, TopologyError};
use topogen_common::source::GraphRenderer;
use tracing::debug;

pub const GRAPH_FILE: &str = "Topology.gv";

/// Renders through the Graphviz `dot` executable.
pub struct Graphviz {
    program: String,
    format: String,
}

impl Graphviz {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            program: "dot".to_string(),
            format: format.into(),
        }
    }

    /// Uses a specific `dot` binary instead of the one on `PATH`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl GraphRenderer for Graphviz {
    fn render(&self, description: &str, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let source = output_dir.join(GRAPH_FILE);
        std::fs::write(&source, description).map_err(|e| {
            TopologyError::RenderingFailure(format!("could not write {}: {e}", source.display()))
        })?;

        let image = output_dir.join(format!("{GRAPH_FILE}.{}", self.format));
        debug!("Running {} -T{} on {}", self.program, self.format, source.display());

        let output = Command::new(&self.program)
            .arg(format!("-T{}", self.format))
            .arg(&source)
            .arg("-o")
            .arg(&image)
            .output()
            .map_err(|e| TopologyError::RenderingFailure(format!("could not run '{}': {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TopologyError::RenderingFailure(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(vec![source, image])
    }
}
