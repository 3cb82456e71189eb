#![cfg(test)]
use std::fs;
use std::path::Path;

use topogen_common::config::Config;
use topogen_common::source::GraphRenderer;
use topogen_core::pipeline::{Topology, TopologyService};
use topogen_core::snapshot::{INTERFACES_FILE, INVENTORY_FILE, LLDP_FILE, SnapshotSource};
use topogen_core::targets::{self, TargetSource};

use crate::lab::RecordingRenderer;

fn write_device(root: &Path, device: &str, lldp: &str, interfaces: &str) {
    let dir = root.join(device);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(LLDP_FILE), lldp).unwrap();
    fs::write(dir.join(INTERFACES_FILE), interfaces).unwrap();
}

/// Targets from the pool inventory, data from captured EOS output.
#[tokio::test]
async fn snapshot_round_trip() {
    let snapshot = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let root = snapshot.path();

    fs::write(
        root.join(INVENTORY_FILE),
        r#"{"pools": {"systest": [
            {"name": "sw1", "owner": "alice"},
            {"name": "sw2", "owner": "alice"},
            {"name": "sw9", "owner": "bob"}
        ]}}"#,
    )
    .unwrap();
    write_device(
        root,
        "sw1",
        r#"{"lldpNeighbors": [
            {"port": "Ethernet3", "neighborDevice": "sw2.lab.example.com", "neighborPort": "Ethernet7", "ttl": 120}
        ]}"#,
        r#"{"interfaceStatuses": {
            "Ethernet3": {"linkStatus": "connected"},
            "Ethernet4": {"linkStatus": "connected"},
            "Management1": {"linkStatus": "connected"}
        }}"#,
    );
    write_device(
        root,
        "sw2",
        r#"{"lldpNeighbors": [
            {"port": "Ethernet7", "neighborDevice": "sw1.lab.example.com", "neighborPort": "Ethernet3", "ttl": 120}
        ]}"#,
        r#"{"interfaceStatuses": {"Ethernet7": {"linkStatus": "connected"}}}"#,
    );

    let source = SnapshotSource::new(root);
    let selection = TargetSource::Owner {
        user: "alice".into(),
        pool: "systest".into(),
    };
    let devices = targets::resolve_targets(&selection, &source, &[]).await.unwrap();
    assert_eq!(devices, ["sw1", "sw2"]);

    let cfg = Config {
        graph: None,
        output_dir: output.path().to_path_buf(),
        ..Config::default()
    };
    let renderer: Box<dyn GraphRenderer> = Box::new(RecordingRenderer::default());
    let outcome = TopologyService::new(Box::new(source.clone()), Box::new(source), renderer)
        .generate(&devices, &cfg)
        .await
        .unwrap();

    assert!(matches!(outcome.topology, Topology::Consolidated(_)));
    assert_eq!(
        outcome.topology.report_lines(),
        [
            "sw1\t(Et3)\t--------------------\t(Et7)sw2",
            "sw1\t(Et4)\t--------------------\t(unknown)Ixia",
        ]
    );
}
