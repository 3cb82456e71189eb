//! # Unmanaged Port Resolution
//!
//! A connected port that never showed up in any LLDP table is assumed to be
//! cabled to traffic generators or other equipment that does not speak LLDP.
//! Each such port becomes an [`UnmanagedLink`] to the external device.

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use topogen_common::model::{Link, UnmanagedLink, host_label};
use topogen_common::port::PortId;
use topogen_common::source::{PortInventorySource, PortState};
use tracing::{debug, info, warn};

use crate::gather::with_timeout;

const LOGICAL_PORT_MARKERS: &[&str] = &["Management", "Port-Channel"];

/// Queries each device's port inventory and returns its unmanaged ports.
///
/// Best effort: a device whose inventory cannot be read is skipped.
pub async fn resolve_unmanaged(
    devices: &[String],
    inventory: &dyn PortInventorySource,
    links: &[Link],
    timeout: Duration,
) -> Vec<UnmanagedLink> {
    let mut unmanaged: Vec<UnmanagedLink> = Vec::new();

    for device in devices {
        info!("Getting unmanaged port details from {device}");

        match with_timeout(device, timeout, inventory.ports(device)).await {
            Ok(ports) => unmanaged.extend(unmanaged_ports(device, &ports, links)),
            Err(e) => warn!("Skipping {device} from unmanaged port calculation: {e}"),
        }
    }

    unmanaged
}

/// Connected data ports of `device` that no link accounts for.
pub fn unmanaged_ports(
    device: &str,
    ports: &BTreeMap<String, PortState>,
    links: &[Link],
) -> Vec<UnmanagedLink> {
    let device = host_label(device);
    let used: HashSet<&PortId> = links.iter().flat_map(|link| link.ports_on(device)).collect();

    ports
        .iter()
        .filter(|(_, state)| state.is_connectable())
        .filter(|(name, _)| is_data_port(name))
        .filter_map(|(name, _)| match PortId::normalize(name) {
            Ok(port) => Some(port),
            Err(_) => {
                debug!("{device}: ignoring non-Ethernet port {name}");
                None
            }
        })
        .filter(|port| !used.contains(port))
        .map(|port| UnmanagedLink {
            device: device.to_string(),
            port,
        })
        .collect()
}

/// Management, aggregate and sub-interfaces never carry test traffic.
fn is_data_port(name: &str) -> bool {
    !name.contains('.') && !LOGICAL_PORT_MARKERS.iter().any(|marker| name.contains(marker))
}
