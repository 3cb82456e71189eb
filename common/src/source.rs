//! # Outbound Ports
//!
//! Contracts for everything the pipeline reads from or writes to the outside
//! world. The core only depends on these traits; concrete adapters (snapshot
//! files, Graphviz, directory export) implement them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;

/// One entry of a device's LLDP neighbor table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LldpNeighbor {
    /// Local interface the neighbor was heard on.
    pub port: String,
    /// System name the neighbor announced.
    pub neighbor_device: String,
    /// Interface the neighbor announced for its side.
    pub neighbor_port: String,
}

/// Link state of a physical port, as `show interfaces status` prints it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortState {
    Connected,
    #[serde(alias = "notconnect")]
    NotConnected,
    Disabled,
    Errdisabled,
    #[serde(other)]
    Unknown,
}

impl PortState {
    /// Whether something is plugged into the port and the link is up.
    pub fn is_connectable(&self) -> bool {
        matches!(self, PortState::Connected)
    }
}

/// A device known to the lab inventory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DutEntry {
    pub name: String,
    pub owner: String,
}

/// Reads a device's LLDP neighbor table.
#[async_trait]
pub trait AdjacencySource: Send + Sync {
    async fn neighbors(&self, device: &str) -> Result<Vec<LldpNeighbor>>;
}

/// Enumerates a device's physical ports and their state.
#[async_trait]
pub trait PortInventorySource: Send + Sync {
    async fn ports(&self, device: &str) -> Result<BTreeMap<String, PortState>>;
}

/// Looks up the devices of a lab pool.
#[async_trait]
pub trait DutDirectory: Send + Sync {
    async fn pool(&self, pool: &str) -> Result<Vec<DutEntry>>;
}

/// Turns a graph description into an image.
pub trait GraphRenderer {
    /// Writes the description and the rendered artifact into `output_dir`,
    /// returning the paths of the files it produced.
    fn render(&self, description: &str, output_dir: &Path) -> Result<Vec<PathBuf>>;
}

/// Hands the generated files to the operator.
pub trait DeliverySink {
    fn deliver(&self, artifacts: &[PathBuf]) -> anyhow::Result<()>;
}
