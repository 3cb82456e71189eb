//! In-memory stand-ins for the device collaborators.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use topogen_common::error::{Result, TopologyError};
use topogen_common::source::{
    AdjacencySource, DeliverySink, GraphRenderer, LldpNeighbor, PortInventorySource, PortState,
};

/// A lab of devices with canned LLDP tables and port inventories.
#[derive(Default, Clone)]
pub struct FakeLab {
    lldp: HashMap<String, Vec<LldpNeighbor>>,
    ports: HashMap<String, BTreeMap<String, PortState>>,
}

impl FakeLab {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `device:port` seeing `neighbor:neighbor_port`.
    pub fn neighbor(mut self, device: &str, port: &str, neighbor: &str, neighbor_port: &str) -> Self {
        self.lldp.entry(device.to_string()).or_default().push(LldpNeighbor {
            port: port.to_string(),
            neighbor_device: neighbor.to_string(),
            neighbor_port: neighbor_port.to_string(),
        });
        self
    }

    /// Records `device:port` in `state`.
    pub fn port(mut self, device: &str, port: &str, state: PortState) -> Self {
        self.ports
            .entry(device.to_string())
            .or_default()
            .insert(port.to_string(), state);
        self
    }

    /// Marks `device` as reachable with an empty LLDP table.
    pub fn silent(mut self, device: &str) -> Self {
        self.lldp.entry(device.to_string()).or_default();
        self
    }
}

#[async_trait]
impl AdjacencySource for FakeLab {
    async fn neighbors(&self, device: &str) -> Result<Vec<LldpNeighbor>> {
        self.lldp
            .get(device)
            .cloned()
            .ok_or_else(|| TopologyError::source_unavailable(device, "eAPI not enabled"))
    }
}

#[async_trait]
impl PortInventorySource for FakeLab {
    async fn ports(&self, device: &str) -> Result<BTreeMap<String, PortState>> {
        self.ports
            .get(device)
            .cloned()
            .ok_or_else(|| TopologyError::source_unavailable(device, "no interface data"))
    }
}

/// Renderer that keeps the description instead of running Graphviz.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    pub descriptions: Arc<Mutex<Vec<String>>>,
    pub fail: bool,
}

impl GraphRenderer for RecordingRenderer {
    fn render(&self, description: &str, output_dir: &Path) -> Result<Vec<PathBuf>> {
        if self.fail {
            return Err(TopologyError::RenderingFailure("dot: command not found".into()));
        }
        self.descriptions.lock().unwrap().push(description.to_string());
        let path = output_dir.join("Topology.gv");
        std::fs::write(&path, description).unwrap();
        Ok(vec![path])
    }
}

/// Delivery sink remembering what it was handed.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub delivered: Arc<Mutex<Vec<PathBuf>>>,
}

impl DeliverySink for RecordingSink {
    fn deliver(&self, artifacts: &[PathBuf]) -> anyhow::Result<()> {
        self.delivered.lock().unwrap().extend_from_slice(artifacts);
        Ok(())
    }
}
