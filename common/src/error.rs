//! # Error Taxonomy
//!
//! Every failure the pipeline can report. Some variants abort the run, others
//! are recovered locally and only logged; [`TopologyError::is_fatal`] tells
//! them apart and [`TopologyError::exit_code`] maps them onto process exit
//! codes.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TopologyError>;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_BAD_SOURCE_DATA: u8 = 2;
pub const EXIT_CONFIG: u8 = 3;
pub const EXIT_OUTPUT: u8 = 4;

#[derive(Error, Debug)]
pub enum TopologyError {
    /// An LLDP port name outside the `Et<n>` convention.
    #[error("malformed port name '{0}': expected an Ethernet interface (e.g. 'Ethernet3' or 'Et3')")]
    MalformedPortName(String),

    /// Both ends of a link were queried and describe it differently.
    #[error(
        "inconsistent adjacency: {device} {port} sees {neighbor} {neighbor_port}, \
         but {neighbor} {neighbor_port} sees {device} {claimed}"
    )]
    InconsistentAdjacency {
        device: String,
        port: String,
        neighbor: String,
        neighbor_port: String,
        claimed: String,
    },

    #[error("source unavailable for {device}: {reason}")]
    SourceUnavailable { device: String, reason: String },

    #[error("conflicting inputs: {0}")]
    ConfigConflict(String),

    #[error("rendering failed: {0}")]
    RenderingFailure(String),

    #[error("device {device} is placed on tier {tier}, but the topology only has {levels} level(s)")]
    InvalidTier { device: String, tier: u8, levels: u8 },

    #[error("could not read the DUT list at {}: {reason}", path.display())]
    TargetsUnavailable { path: PathBuf, reason: String },

    #[error("no target devices left to query")]
    NoTargets,

    #[error("could not write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TopologyError {
    pub fn source_unavailable(device: &str, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            device: device.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error ends the run rather than dropping one unit of work.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::SourceUnavailable { .. } | Self::ConfigConflict(_) | Self::RenderingFailure(_)
        )
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::MalformedPortName(_) | Self::InconsistentAdjacency { .. } => EXIT_BAD_SOURCE_DATA,
            Self::InvalidTier { .. } | Self::TargetsUnavailable { .. } | Self::NoTargets => EXIT_CONFIG,
            Self::Output { .. } => EXIT_OUTPUT,
            Self::SourceUnavailable { .. } | Self::ConfigConflict(_) | Self::RenderingFailure(_) => {
                EXIT_FAILURE
            }
        }
    }
}
