//! # Adjacency Model
//!
//! The values handed from stage to stage:
//!
//! * [`AdjacencyRecord`]: one LLDP row, as seen from the device that reported it.
//! * [`Link`]: one physical connection after mirrored rows are collapsed.
//! * [`UnmanagedLink`]: a connected port nobody answered for over LLDP.
//! * [`ConsolidatedEdge`]: parallel links between two devices merged into one.
//!
//! The report and the renderer only need the four endpoint fields, which the
//! [`Edge`] trait exposes for both links and consolidated edges.

use std::net::IpAddr;

use crate::port::PortId;

/// Name of the synthetic device standing in for every unmanaged endpoint.
pub const EXTERNAL_DEVICE: &str = "Ixia";

/// One direction of a reported link, ports exactly as the device printed them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AdjacencyRecord {
    pub local_device: String,
    pub local_port: String,
    pub remote_device: String,
    pub remote_port: String,
}

impl AdjacencyRecord {
    pub fn new(
        local_device: impl Into<String>,
        local_port: impl Into<String>,
        remote_device: impl Into<String>,
        remote_port: impl Into<String>,
    ) -> Self {
        Self {
            local_device: local_device.into(),
            local_port: local_port.into(),
            remote_device: remote_device.into(),
            remote_port: remote_port.into(),
        }
    }
}

/// A physical connection. `port_a` belongs to `device_a`, `port_b` to `device_b`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    pub device_a: String,
    pub port_a: PortId,
    pub device_b: String,
    pub port_b: PortId,
}

impl Link {
    /// The same connection seen from the other end.
    pub fn mirrored(&self) -> Self {
        Self {
            device_a: self.device_b.clone(),
            port_a: self.port_b.clone(),
            device_b: self.device_a.clone(),
            port_b: self.port_a.clone(),
        }
    }

    /// Ports this link occupies on `device` (two for a cable looped back
    /// into the same switch).
    pub fn ports_on<'a>(&'a self, device: &'a str) -> impl Iterator<Item = &'a PortId> + 'a {
        [(&self.device_a, &self.port_a), (&self.device_b, &self.port_b)]
            .into_iter()
            .filter(move |(name, _)| name.as_str() == device)
            .map(|(_, port)| port)
    }
}

/// A connected DUT port with no LLDP neighbor behind it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnmanagedLink {
    pub device: String,
    pub port: PortId,
}

impl From<UnmanagedLink> for Link {
    fn from(unmanaged: UnmanagedLink) -> Self {
        Link {
            device_a: unmanaged.device,
            port_a: unmanaged.port,
            device_b: EXTERNAL_DEVICE.to_string(),
            port_b: PortId::unknown(),
        }
    }
}

/// All links between one ordered device pair, labelled with their port spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidatedEdge {
    pub device_a: String,
    pub device_b: String,
    pub port_range_a: PortId,
    pub port_range_b: PortId,
}

/// Read view over anything drawn as one line of the topology.
pub trait Edge {
    fn device_a(&self) -> &str;
    fn port_a(&self) -> &PortId;
    fn device_b(&self) -> &str;
    fn port_b(&self) -> &PortId;
}

impl Edge for Link {
    fn device_a(&self) -> &str {
        &self.device_a
    }
    fn port_a(&self) -> &PortId {
        &self.port_a
    }
    fn device_b(&self) -> &str {
        &self.device_b
    }
    fn port_b(&self) -> &PortId {
        &self.port_b
    }
}

impl Edge for ConsolidatedEdge {
    fn device_a(&self) -> &str {
        &self.device_a
    }
    fn port_a(&self) -> &PortId {
        &self.port_range_a
    }
    fn device_b(&self) -> &str {
        &self.device_b
    }
    fn port_b(&self) -> &PortId {
        &self.port_range_b
    }
}

/// Reduces an LLDP system name to its host label (`sw2.lab.example.com` -> `sw2`).
///
/// Addresses are returned untouched.
pub fn host_label(name: &str) -> &str {
    let name = name.trim();
    if name.parse::<IpAddr>().is_ok() {
        return name;
    }
    match name.split_once('.') {
        Some((host, _)) if !host.is_empty() => host,
        _ => name,
    }
}
