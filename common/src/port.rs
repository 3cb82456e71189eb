//! # Port Identifiers
//!
//! Interface names arrive in whatever form a device prints them
//! (`Ethernet3/1`, `Et3`, ...). [`PortId`] holds the canonical short form
//! used everywhere else: `Et` followed by the port number, or a span such as
//! `Et1-4` once parallel links are consolidated.

use std::fmt;

use crate::error::{Result, TopologyError};

const PREFIX: &str = "Et";
const UNKNOWN: &str = "unknown";

/// A normalized interface identifier.
///
/// Ordering is textual, so `Et10` sorts before `Et2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortId(String);

impl PortId {
    /// Canonicalizes a raw interface name.
    ///
    /// Keeps everything from the first `Et` onward and drops the rest of the
    /// alphabetic run that follows it, so `Ethernet3/1` and `Et3/1` both
    /// become `Et3/1`. Fails when the name contains no `Et` at all.
    pub fn normalize(raw: &str) -> Result<Self> {
        let Some(start) = raw.find(PREFIX) else {
            return Err(TopologyError::MalformedPortName(raw.to_string()));
        };

        let rest = raw[start + PREFIX.len()..].trim_start_matches(|c: char| c.is_ascii_alphabetic());
        Ok(Self(format!("{PREFIX}{rest}")))
    }

    /// The port of a device nothing is known about.
    pub fn unknown() -> Self {
        Self(UNKNOWN.to_string())
    }

    /// Range label covering `min` through `max`: `Et1-4`, or `min` unchanged
    /// when both bounds are the same port. A range touching the unknown
    /// sentinel is itself unknown.
    pub fn span(min: &PortId, max: &PortId) -> Self {
        if min.is_unknown() || max.is_unknown() {
            return Self::unknown();
        }
        if min == max {
            return min.clone();
        }
        Self(format!("{}-{}", min.0, max.suffix()))
    }

    /// Text after the `Et` prefix, or the whole identifier for sentinels.
    fn suffix(&self) -> &str {
        self.0.strip_prefix(PREFIX).unwrap_or(&self.0)
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
