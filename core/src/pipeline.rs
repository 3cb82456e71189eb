//! # Topology Service
//!
//! Runs a full generation for a list of target devices:
//!
//! 1. **Gather** every device's LLDP table.
//! 2. **Deduplicate** mirrored rows into links (fatal on bad data).
//! 3. **Resolve** unmanaged ports, if requested.
//! 4. **Consolidate** parallel links, if requested.
//! 5. **Report** the topology as text.
//! 6. **Render** the graph and **deliver** the files (both best effort).
//!
//! Each stage consumes the complete output of the one before it. Nothing is
//! written to disk until step 5, so a fatal error leaves no partial output.

use std::path::PathBuf;

use topogen_common::config::Config;
use topogen_common::error::{Result, TopologyError};
use topogen_common::model::{ConsolidatedEdge, Link};
use topogen_common::source::{AdjacencySource, DeliverySink, GraphRenderer, PortInventorySource};
use tracing::{info, warn};

use crate::gather::{self, ProgressFn};
use crate::{consolidate, dedup, render, report, unmanaged};

/// Final edge list, consolidated or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Topology {
    Links(Vec<Link>),
    Consolidated(Vec<ConsolidatedEdge>),
}

impl Topology {
    pub fn len(&self) -> usize {
        match self {
            Topology::Links(links) => links.len(),
            Topology::Consolidated(edges) => edges.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn report_lines(&self) -> Vec<String> {
        match self {
            Topology::Links(links) => links.iter().map(report::report_line).collect(),
            Topology::Consolidated(edges) => edges.iter().map(report::report_line).collect(),
        }
    }

    fn write_report(&self, cfg: &Config) -> Result<PathBuf> {
        match self {
            Topology::Links(links) => report::write_report(links, &cfg.output_dir),
            Topology::Consolidated(edges) => report::write_report(edges, &cfg.output_dir),
        }
    }

    fn describe(&self, cfg: &Config) -> Option<String> {
        let layout = cfg.graph.as_ref()?;
        Some(match self {
            Topology::Links(links) => render::describe(links, cfg.port_labels, layout),
            Topology::Consolidated(edges) => render::describe(edges, cfg.port_labels, layout),
        })
    }
}

/// What a run produced.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub topology: Topology,
    /// Files written, report first.
    pub artifacts: Vec<PathBuf>,
    /// Set when the graph was requested but could not be rendered.
    pub rendering_error: Option<TopologyError>,
}

/// Application service wiring the pipeline stages to their collaborators.
pub struct TopologyService {
    adjacency: Box<dyn AdjacencySource>,
    inventory: Box<dyn PortInventorySource>,
    renderer: Box<dyn GraphRenderer>,
    delivery: Option<Box<dyn DeliverySink>>,
    on_device: Option<ProgressFn>,
}

impl TopologyService {
    pub fn new(
        adjacency: Box<dyn AdjacencySource>,
        inventory: Box<dyn PortInventorySource>,
        renderer: Box<dyn GraphRenderer>,
    ) -> Self {
        Self {
            adjacency,
            inventory,
            renderer,
            delivery: None,
            on_device: None,
        }
    }

    pub fn with_delivery(mut self, delivery: Box<dyn DeliverySink>) -> Self {
        self.delivery = Some(delivery);
        self
    }

    /// Registers a callback invoked as each device is queried.
    pub fn on_device(mut self, callback: ProgressFn) -> Self {
        self.on_device = Some(callback);
        self
    }

    /// Builds the topology of `devices` and writes it out per `cfg`.
    pub async fn generate(&self, devices: &[String], cfg: &Config) -> Result<GenerationOutcome> {
        let topology = self.build(devices, cfg).await?;

        let report = topology.write_report(cfg)?;
        info!("Text topology written to {}", report.display());
        let mut artifacts = vec![report];

        let mut rendering_error = None;
        if let Some(description) = topology.describe(cfg) {
            match self.renderer.render(&description, &cfg.output_dir) {
                Ok(files) => artifacts.extend(files),
                Err(e) => {
                    warn!("{e}; the text topology is still available");
                    rendering_error = Some(e);
                }
            }
        } else {
            info!("Graph not generated as requested");
        }

        if let Some(delivery) = &self.delivery {
            if let Err(e) = delivery.deliver(&artifacts) {
                warn!("Could not deliver the generated files: {e:#}");
            }
        }

        Ok(GenerationOutcome {
            topology,
            artifacts,
            rendering_error,
        })
    }

    /// Runs the in-memory stages only; nothing is written.
    pub async fn build(&self, devices: &[String], cfg: &Config) -> Result<Topology> {
        if devices.is_empty() {
            return Err(TopologyError::NoTargets);
        }

        let records = gather::gather_adjacency(
            devices,
            self.adjacency.as_ref(),
            cfg.query_timeout,
            self.on_device.as_ref(),
        )
        .await;
        info!("Collected {} LLDP entries from {} device(s)", records.len(), devices.len());

        let mut links = dedup::deduplicate(&records)?;
        info!("{} unique link(s) after removing duplicates", links.len());

        if cfg.include_unmanaged {
            let unmanaged = unmanaged::resolve_unmanaged(
                devices,
                self.inventory.as_ref(),
                &links,
                cfg.query_timeout,
            )
            .await;
            info!("{} unmanaged port(s) found", unmanaged.len());
            links.extend(unmanaged.into_iter().map(Link::from));
        }

        Ok(if cfg.consolidate {
            Topology::Consolidated(consolidate::consolidate(&links))
        } else {
            Topology::Links(links)
        })
    }
}
