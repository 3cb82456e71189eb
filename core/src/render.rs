//! # Graph Description
//!
//! Builds the Graphviz `digraph` text for an edge list. The layout itself is
//! left to the renderer; this module only decides node styling, optional
//! tiering and edge labels.
//!
//! Device names are rewritten (`-` and `.` become `_`) because the
//! description uses them as bare identifiers. Names starting with a digit,
//! such as neighbors known only by IP address, are quoted as well.

use std::collections::BTreeMap;

use topogen_common::config::{GraphLayout, TierMap};
use topogen_common::model::Edge;
use tracing::warn;

mod graphviz;

pub use graphviz::{GRAPH_FILE, Graphviz};

/// Above this many edges the graph is laid out left to right.
const LEFT_TO_RIGHT_THRESHOLD: usize = 20;

/// Turns a device name into a DOT node ID.
pub fn sanitize(name: &str) -> String {
    let id = name.replace(['-', '.'], "_");
    if id.starts_with(|c: char| c.is_ascii_digit()) {
        format!("\"{id}\"")
    } else {
        id
    }
}

/// Renders `edges` into a Graphviz description.
pub fn describe<E: Edge>(edges: &[E], port_labels: bool, layout: &GraphLayout) -> String {
    let mut out = String::from("digraph topology {\n");
    match layout {
        GraphLayout::Automatic => out.push_str("size=\"8,5\"\n"),
        GraphLayout::Tiered(_) => {}
    }
    out.push_str("node [shape = box];\n");
    if edges.len() > LEFT_TO_RIGHT_THRESHOLD {
        out.push_str("rankdir=\"LR\"\n");
    }

    match layout {
        GraphLayout::Automatic => {
            for edge in edges {
                out.push_str(&edge_statement(edge, port_labels, ""));
            }
            out.push_str("}\n");
        }
        GraphLayout::Tiered(tiers) => {
            out.push_str(&tier_subgraphs(edges, tiers));
            out.push_str("subgraph connector {\n");
            for edge in edges {
                out.push_str(&edge_statement(edge, port_labels, ",labelfontsize=0.5"));
            }
            out.push_str("}\n}\n");
        }
    }

    out
}

fn edge_statement<E: Edge>(edge: &E, port_labels: bool, label_attrs: &str) -> String {
    let a = sanitize(edge.device_a());
    let b = sanitize(edge.device_b());
    if port_labels {
        format!(
            "{a} -> {b} [ label = \"{}<------>{}\"{label_attrs} ]\n",
            edge.port_a(),
            edge.port_b()
        )
    } else {
        format!("{a} -> {b}\n")
    }
}

/// One subgraph per tier, top tier first.
fn tier_subgraphs<E: Edge>(edges: &[E], tiers: &TierMap) -> String {
    let mut members: BTreeMap<u8, Vec<String>> = BTreeMap::new();
    let mut placed: Vec<&str> = Vec::new();

    for device in edges.iter().flat_map(|edge| [edge.device_a(), edge.device_b()]) {
        if placed.contains(&device) {
            continue;
        }
        placed.push(device);

        match tiers.tier_of(device) {
            Some(tier) => members.entry(tier).or_default().push(sanitize(device)),
            None => warn!("{device} has no tier assigned; its placement is left to the renderer"),
        }
    }

    let levels = tiers.levels();
    let mut out = String::new();

    for level in (1..=levels).rev() {
        let (rank, color) = match level {
            1 => ("max", "green"),
            2 if levels == 2 => ("min", "red"),
            2 => ("same", "red"),
            _ => ("min", "yellow"),
        };

        out.push_str(&format!("subgraph level{level} {{\n"));
        out.push_str(&format!("rank={rank};\n"));
        out.push_str(&format!(
            "node[style=filled, shape=box, color={color}, fontsize=8];\n"
        ));
        for device in members.get(&level).into_iter().flatten() {
            out.push_str(&format!("{device};\n"));
        }
        out.push_str("}\n");
    }

    out
}
