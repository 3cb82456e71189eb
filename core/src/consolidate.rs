//! # Link Consolidation
//!
//! Lab devices are often cabled with several parallel links. Drawing each one
//! clutters the graph, so links between the same ordered device pair are
//! merged into a single edge labelled with the span of ports they use.

use std::collections::{BTreeSet, HashMap};

use topogen_common::model::{ConsolidatedEdge, Link};
use topogen_common::port::PortId;

struct Group<'a> {
    device_a: &'a str,
    device_b: &'a str,
    ports_a: BTreeSet<&'a PortId>,
    ports_b: BTreeSet<&'a PortId>,
}

/// Merges links per `(device_a, device_b)` pair, in order of first appearance.
///
/// The pair is taken as recorded: `sw1 -> sw2` and `sw2 -> sw1` stay
/// separate edges.
pub fn consolidate(links: &[Link]) -> Vec<ConsolidatedEdge> {
    let mut groups: Vec<Group<'_>> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for link in links {
        let key = (link.device_a.as_str(), link.device_b.as_str());
        let idx = *index.entry(key).or_insert_with(|| {
            groups.push(Group {
                device_a: key.0,
                device_b: key.1,
                ports_a: BTreeSet::new(),
                ports_b: BTreeSet::new(),
            });
            groups.len() - 1
        });

        groups[idx].ports_a.insert(&link.port_a);
        groups[idx].ports_b.insert(&link.port_b);
    }

    groups
        .into_iter()
        .map(|group| ConsolidatedEdge {
            device_a: group.device_a.to_string(),
            device_b: group.device_b.to_string(),
            port_range_a: port_range(&group.ports_a),
            port_range_b: port_range(&group.ports_b),
        })
        .collect()
}

fn port_range(ports: &BTreeSet<&PortId>) -> PortId {
    match (ports.first(), ports.last()) {
        (Some(min), Some(max)) => PortId::span(min, max),
        _ => PortId::unknown(),
    }
}
