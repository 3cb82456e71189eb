//! # Adjacency Gathering
//!
//! Queries every target for its LLDP table, one device at a time. A device
//! that errors or hangs past the timeout is logged and skipped; the rest of
//! the run carries on without it.

use std::future::Future;
use std::time::Duration;

use topogen_common::error::{Result, TopologyError};
use topogen_common::model::AdjacencyRecord;
use topogen_common::source::AdjacencySource;
use tracing::{info, warn};

/// Called with the device name right before it is queried.
pub type ProgressFn = Box<dyn Fn(&str) + Send + Sync>;

/// Collects the LLDP rows of every reachable device, in `devices` order.
pub async fn gather_adjacency(
    devices: &[String],
    source: &dyn AdjacencySource,
    timeout: Duration,
    on_device: Option<&ProgressFn>,
) -> Vec<AdjacencyRecord> {
    let mut records: Vec<AdjacencyRecord> = Vec::new();

    for device in devices {
        if let Some(report) = on_device {
            report(device);
        }
        info!("Getting LLDP info from {device}");

        match with_timeout(device, timeout, source.neighbors(device)).await {
            Ok(neighbors) => {
                records.extend(neighbors.into_iter().map(|neighbor| {
                    AdjacencyRecord::new(
                        device.as_str(),
                        neighbor.port,
                        neighbor.neighbor_device,
                        neighbor.neighbor_port,
                    )
                }));
            }
            Err(e) => warn!("Skipping {device}: {e}"),
        }
    }

    records
}

/// Bounds a single device query, turning a hang into `SourceUnavailable`.
pub(crate) async fn with_timeout<T>(
    device: &str,
    timeout: Duration,
    query: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(timeout, query).await {
        Ok(result) => result,
        Err(_) => Err(TopologyError::source_unavailable(
            device,
            format!("no answer within {:.1}s", timeout.as_secs_f64()),
        )),
    }
}
