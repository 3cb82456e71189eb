//! # Snapshot Adapter
//!
//! Serves adjacency, port inventory and pool data from captured command
//! output instead of live devices. A snapshot directory looks like:
//!
//! ```text
//! snapshot/
//! ├── inventory.json        {"pools": {"systest": [{"name": "sw1", "owner": "alice"}]}}
//! ├── sw1/
//! │   ├── lldp.json         `show lldp neighbors | json`
//! │   └── interfaces.json   `show interfaces status | json`
//! └── sw2/ ...
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use topogen_common::error::{Result, TopologyError};
use topogen_common::source::{
    AdjacencySource, DutDirectory, DutEntry, LldpNeighbor, PortInventorySource, PortState,
};

pub const INVENTORY_FILE: &str = "inventory.json";
pub const LLDP_FILE: &str = "lldp.json";
pub const INTERFACES_FILE: &str = "interfaces.json";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LldpNeighbors {
    lldp_neighbors: Vec<LldpNeighborEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LldpNeighborEntry {
    port: String,
    neighbor_device: String,
    neighbor_port: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InterfaceStatuses {
    interface_statuses: BTreeMap<String, InterfaceStatus>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InterfaceStatus {
    link_status: PortState,
}

#[derive(Deserialize)]
struct Inventory {
    pools: HashMap<String, Vec<DutEntry>>,
}

/// Reads device data from a snapshot directory.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    root: PathBuf,
}

impl SnapshotSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn device_file(&self, device: &str, file: &str) -> PathBuf {
        self.root.join(device).join(file)
    }
}

async fn read_json<T: DeserializeOwned>(subject: &str, path: &Path) -> Result<T> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| TopologyError::source_unavailable(subject, format!("{}: {e}", path.display())))?;

    serde_json::from_str(&raw)
        .map_err(|e| TopologyError::source_unavailable(subject, format!("{}: {e}", path.display())))
}

#[async_trait]
impl AdjacencySource for SnapshotSource {
    async fn neighbors(&self, device: &str) -> Result<Vec<LldpNeighbor>> {
        let table: LldpNeighbors = read_json(device, &self.device_file(device, LLDP_FILE)).await?;

        Ok(table
            .lldp_neighbors
            .into_iter()
            .map(|entry| LldpNeighbor {
                port: entry.port,
                neighbor_device: entry.neighbor_device,
                neighbor_port: entry.neighbor_port,
            })
            .collect())
    }
}

#[async_trait]
impl PortInventorySource for SnapshotSource {
    async fn ports(&self, device: &str) -> Result<BTreeMap<String, PortState>> {
        let status: InterfaceStatuses =
            read_json(device, &self.device_file(device, INTERFACES_FILE)).await?;

        Ok(status
            .interface_statuses
            .into_iter()
            .map(|(name, status)| (name, status.link_status))
            .collect())
    }
}

#[async_trait]
impl DutDirectory for SnapshotSource {
    async fn pool(&self, pool: &str) -> Result<Vec<DutEntry>> {
        let mut inventory: Inventory = read_json(pool, &self.root.join(INVENTORY_FILE)).await?;

        inventory
            .pools
            .remove(pool)
            .ok_or_else(|| TopologyError::source_unavailable(pool, "no such pool in the inventory"))
    }
}
