//! # Adjacency Deduplication
//!
//! Every cable between two queried devices shows up twice, once in each
//! device's LLDP table. This module turns the raw rows into one [`Link`] per
//! physical connection.
//!
//! The row that survives is the one reported first: devices are queried in
//! target-list order, so the earlier device ends up as `device_a`.

use std::collections::{HashMap, HashSet};

use topogen_common::error::{Result, TopologyError};
use topogen_common::model::{AdjacencyRecord, Link, host_label};
use topogen_common::port::PortId;
use tracing::debug;

/// Collapses mirrored rows into canonical links.
///
/// Fails on the first port name that cannot be normalized, and when two
/// queried devices disagree about the same cable. A partial topology is
/// never returned.
pub fn deduplicate(records: &[AdjacencyRecord]) -> Result<Vec<Link>> {
    let reported: Vec<Link> = records
        .iter()
        .map(to_link)
        .collect::<Result<Vec<Link>>>()?;

    check_consistency(&reported)?;

    let mut seen: HashSet<Link> = HashSet::new();
    let mut links: Vec<Link> = Vec::new();

    for link in reported {
        let mirror = link.mirrored();

        if mirror == link {
            debug!("Dropping self-loop {} {}", link.device_a, link.port_a);
            continue;
        }

        if seen.contains(&link) || seen.contains(&mirror) {
            continue;
        }

        seen.insert(link.clone());
        links.push(link);
    }

    Ok(links)
}

fn to_link(record: &AdjacencyRecord) -> Result<Link> {
    Ok(Link {
        device_a: host_label(&record.local_device).to_string(),
        port_a: PortId::normalize(&record.local_port)?,
        device_b: host_label(&record.remote_device).to_string(),
        port_b: PortId::normalize(&record.remote_port)?,
    })
}

/// Rejects cables whose two ends were both queried but tell different stories.
///
/// When `X:px` names `Y:py` as its neighbor and `Y` was queried too, then
/// whatever `Y` reports on `py` about `X` must point back at `px`. `Y`
/// saying nothing about `X` on `py` is a one-sided report, not a conflict.
fn check_consistency(reported: &[Link]) -> Result<()> {
    let mut claims: HashMap<(&str, &PortId), Vec<&Link>> = HashMap::new();
    for link in reported {
        claims
            .entry((link.device_a.as_str(), &link.port_a))
            .or_default()
            .push(link);
    }

    let reporters: HashSet<&str> = reported.iter().map(|link| link.device_a.as_str()).collect();

    for link in reported {
        if !reporters.contains(link.device_b.as_str()) {
            continue;
        }

        let Some(far_end) = claims.get(&(link.device_b.as_str(), &link.port_b)) else {
            continue;
        };

        let about_us: Vec<&&Link> = far_end
            .iter()
            .filter(|claim| claim.device_b == link.device_a)
            .collect();

        if about_us.is_empty() || about_us.iter().any(|claim| claim.port_b == link.port_a) {
            continue;
        }

        return Err(TopologyError::InconsistentAdjacency {
            device: link.device_a.clone(),
            port: link.port_a.to_string(),
            neighbor: link.device_b.clone(),
            neighbor_port: link.port_b.to_string(),
            claimed: about_us[0].port_b.to_string(),
        });
    }

    Ok(())
}
