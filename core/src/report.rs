//! # Text Report
//!
//! The plain-text rendition of the topology. It is the primary output of a
//! run and is written before any graph rendering is attempted.

use std::path::{Path, PathBuf};

use topogen_common::error::{Result, TopologyError};
use topogen_common::model::Edge;

pub const REPORT_FILE: &str = "TopologyGenerated.txt";

const HEADER: &str = "> The topology in text format is:";
const CABLE: &str = "--------------------";

/// One line per edge: `sw1\t(Et3)\t--------------------\t(Et7)sw2`.
pub fn report_line<E: Edge>(edge: &E) -> String {
    format!(
        "{}\t({})\t{CABLE}\t({}){}",
        edge.device_a(),
        edge.port_a(),
        edge.port_b(),
        edge.device_b()
    )
}

pub fn trailer() -> String {
    format!("---Generated by topogen v{}---", env!("CARGO_PKG_VERSION"))
}

/// Full contents of the report file.
pub fn render_report<E: Edge>(edges: &[E]) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    for edge in edges {
        out.push_str(&report_line(edge));
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&trailer());
    out.push('\n');
    out
}

/// Writes the report into `dir` and returns its path.
pub fn write_report<E: Edge>(edges: &[E], dir: &Path) -> Result<PathBuf> {
    let path = dir.join(REPORT_FILE);
    std::fs::write(&path, render_report(edges)).map_err(|source| TopologyError::Output {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
