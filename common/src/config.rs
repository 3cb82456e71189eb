//! # Run Configuration
//!
//! Every decision the operator makes is captured here before the pipeline
//! starts; nothing in the core prompts mid-run.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, TopologyError};

pub const DEFAULT_POOL: &str = "systest";
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_RENDER_FORMAT: &str = "pdf";

pub struct Config {
    /// Add a link to the external device for every connected port without
    /// an LLDP neighbor.
    pub include_unmanaged: bool,
    /// Merge parallel links between the same two devices into one edge.
    pub consolidate: bool,
    /// Label graph edges with their port ranges.
    pub port_labels: bool,
    /// `None` skips graph generation; the text report is always written.
    pub graph: Option<GraphLayout>,
    /// Output format handed to the renderer (`pdf`, `png`, `svg`, ...).
    pub render_format: String,
    /// Upper bound for a single device query.
    pub query_timeout: Duration,
    /// Directory receiving the report, graph description and rendered image.
    pub output_dir: PathBuf,
    /// Optional directory the generated files are delivered to.
    pub export_dir: Option<PathBuf>,
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            include_unmanaged: true,
            consolidate: true,
            port_labels: true,
            graph: Some(GraphLayout::Automatic),
            render_format: DEFAULT_RENDER_FORMAT.to_string(),
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            output_dir: PathBuf::from("."),
            export_dir: None,
            quiet: 0,
        }
    }
}

/// How devices are arranged in the rendered graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphLayout {
    /// Leave placement entirely to the renderer.
    Automatic,
    /// Stack devices in tiers, e.g. leaf (1) below spine (2).
    Tiered(TierMap),
}

/// Device placement for the tiered layout. Tier 1 is the lowest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierMap {
    levels: u8,
    tiers: HashMap<String, u8>,
}

impl TierMap {
    pub fn new(levels: u8) -> Self {
        Self {
            levels,
            tiers: HashMap::new(),
        }
    }

    /// Places `device` on `tier`, rejecting tiers outside `1..=levels`.
    pub fn assign(&mut self, device: impl Into<String>, tier: u8) -> Result<()> {
        let device = device.into();
        if tier == 0 || tier > self.levels {
            return Err(TopologyError::InvalidTier {
                device,
                tier,
                levels: self.levels,
            });
        }
        self.tiers.insert(device, tier);
        Ok(())
    }

    pub fn levels(&self) -> u8 {
        self.levels
    }

    pub fn tier_of(&self, device: &str) -> Option<u8> {
        self.tiers.get(device).copied()
    }
}

/// Parses a `device=tier` pair as given on the command line.
pub fn parse_tier(s: &str) -> std::result::Result<(String, u8), String> {
    let Some((device, tier)) = s.split_once('=') else {
        return Err(format!("expected DEVICE=TIER, got '{s}'"));
    };

    let device = device.trim();
    if device.is_empty() {
        return Err(format!("missing device name in '{s}'"));
    }

    let tier = tier
        .trim()
        .parse::<u8>()
        .map_err(|e| format!("invalid tier in '{s}': {e}"))?;

    Ok((device.to_string(), tier))
}
