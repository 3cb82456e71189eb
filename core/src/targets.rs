//! # Target Selection
//!
//! Decides which devices a run queries. Targets come either from a DUT list
//! file or from the devices a user owns in a lab pool; excluded devices are
//! dropped afterwards.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use topogen_common::error::{Result, TopologyError};
use topogen_common::source::DutDirectory;
use tracing::{info, warn};

pub const DEFAULT_DUT_FILE: &str = "setup.txt";

/// Where the device list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSource {
    /// A file listing one device per line.
    File(PathBuf),
    /// Every device in `pool` owned by `user`.
    Owner { user: String, pool: String },
}

impl TargetSource {
    /// Picks the source from the operator's flags.
    ///
    /// An owner lookup wins over a file when both are given; with neither,
    /// the default DUT file in the home directory is used.
    pub fn select(user: Option<String>, pool: &str, file: Option<PathBuf>) -> Self {
        match (user, file) {
            (Some(user), file) => {
                if let Some(file) = file {
                    let conflict = TopologyError::ConfigConflict(format!(
                        "both a DUT file ({}) and a username ({user}) were given",
                        file.display()
                    ));
                    warn!("{conflict}; the username takes priority and the file is ignored");
                }
                Self::Owner {
                    user,
                    pool: pool.to_string(),
                }
            }
            (None, Some(file)) => Self::File(file),
            (None, None) => {
                let file = default_dut_file();
                info!("No username or file given, using {}", file.display());
                Self::File(file)
            }
        }
    }
}

/// `~/setup.txt`, or `./setup.txt` when no home directory is known.
pub fn default_dut_file() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(DEFAULT_DUT_FILE)
}

/// Resolves `source` into a device list with `excluded` removed.
pub async fn resolve_targets(
    source: &TargetSource,
    directory: &dyn DutDirectory,
    excluded: &[String],
) -> Result<Vec<String>> {
    let devices = match source {
        TargetSource::File(path) => read_dut_list(path).await?,
        TargetSource::Owner { user, pool } => owned_duts(directory, user, pool).await?,
    };

    let devices = exclude(devices, excluded);
    if devices.is_empty() {
        return Err(TopologyError::NoTargets);
    }

    info!("Topology will be generated for: {}", devices.join(", "));
    Ok(devices)
}

pub async fn read_dut_list(path: &Path) -> Result<Vec<String>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| TopologyError::TargetsUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let devices = parse_dut_list(&contents);
    info!("DUTs listed in {}: {}", path.display(), devices.join(", "));
    Ok(devices)
}

/// One device per line; blank lines and `#` comments are skipped.
pub fn parse_dut_list(contents: &str) -> Vec<String> {
    let devices = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from);
    unique(devices)
}

pub async fn owned_duts(directory: &dyn DutDirectory, user: &str, pool: &str) -> Result<Vec<String>> {
    let entries = directory.pool(pool).await?;
    let devices = unique(
        entries
            .into_iter()
            .filter(|entry| entry.owner == user)
            .map(|entry| entry.name),
    );
    info!("DUTs owned by {user} in {pool}: {}", devices.join(", "));
    Ok(devices)
}

/// Drops `excluded` devices, keeping the original order.
pub fn exclude(devices: Vec<String>, excluded: &[String]) -> Vec<String> {
    if excluded.is_empty() {
        return devices;
    }
    let excluded: HashSet<&str> = excluded.iter().map(String::as_str).collect();
    devices
        .into_iter()
        .filter(|device| !excluded.contains(device.as_str()))
        .collect()
}

fn unique(devices: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    devices.filter(|device| seen.insert(device.clone())).collect()
}
