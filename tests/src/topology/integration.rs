#![cfg(test)]
use std::collections::HashSet;

use proptest::prelude::*;
use tempfile::TempDir;
use topogen_common::config::{Config, GraphLayout, TierMap};
use topogen_common::error::TopologyError;
use topogen_common::model::{ConsolidatedEdge, EXTERNAL_DEVICE, Link};
use topogen_common::port::PortId;
use topogen_common::source::PortState;
use topogen_core::consolidate::consolidate;
use topogen_core::pipeline::{Topology, TopologyService};
use topogen_core::report::REPORT_FILE;

use crate::lab::{FakeLab, RecordingRenderer, RecordingSink};

fn devices(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn text_only(dir: &TempDir) -> Config {
    Config {
        include_unmanaged: false,
        consolidate: false,
        graph: None,
        output_dir: dir.path().to_path_buf(),
        ..Config::default()
    }
}

fn service(lab: FakeLab, renderer: RecordingRenderer) -> TopologyService {
    TopologyService::new(Box::new(lab.clone()), Box::new(lab), Box::new(renderer))
}

fn et(raw: &str) -> PortId {
    PortId::normalize(raw).unwrap()
}

/// sw1:Et3 <-> sw2:Et7, reported by both ends.
#[tokio::test]
async fn mirrored_report_yields_one_link() {
    let dir = tempfile::tempdir().unwrap();
    let lab = FakeLab::new()
        .neighbor("sw1", "Ethernet3", "sw2", "Ethernet7")
        .neighbor("sw2", "Ethernet7", "sw1", "Ethernet3");

    let outcome = service(lab, RecordingRenderer::default())
        .generate(&devices(&["sw1", "sw2"]), &text_only(&dir))
        .await
        .unwrap();

    let Topology::Links(links) = &outcome.topology else {
        panic!("consolidation was disabled");
    };
    assert_eq!(links.len(), 1);
    assert_eq!(
        outcome.topology.report_lines(),
        ["sw1\t(Et3)\t--------------------\t(Et7)sw2"]
    );

    let report = std::fs::read_to_string(dir.path().join(REPORT_FILE)).unwrap();
    assert!(report.contains("sw1\t(Et3)\t--------------------\t(Et7)sw2\n"));
    assert_eq!(outcome.artifacts, [dir.path().join(REPORT_FILE)]);
}

#[tokio::test]
async fn link_reported_by_one_end_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    let lab = FakeLab::new()
        .neighbor("sw1", "Ethernet1", "sw2", "Ethernet1")
        .neighbor("sw1", "Ethernet2", "linux-host.lab.example.com", "Ethernet0")
        .neighbor("sw2", "Ethernet1", "sw1", "Ethernet1");

    let topology = service(lab, RecordingRenderer::default())
        .build(&devices(&["sw1", "sw2"]), &text_only(&dir))
        .await
        .unwrap();

    assert_eq!(topology.len(), 2);
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none(), "build must not write");
}

#[tokio::test]
async fn unmanaged_port_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let lab = FakeLab::new()
        .neighbor("sw1", "Ethernet1", "sw2", "Ethernet1")
        .silent("sw2")
        .port("sw1", "Ethernet1", PortState::Connected)
        .port("sw1", "Ethernet2", PortState::Connected)
        .port("sw1", "Management1", PortState::Connected);
    let cfg = Config {
        include_unmanaged: true,
        ..text_only(&dir)
    };

    let topology = service(lab, RecordingRenderer::default())
        .build(&devices(&["sw1", "sw2"]), &cfg)
        .await
        .unwrap();

    let Topology::Links(links) = topology else {
        panic!("consolidation was disabled");
    };
    let unmanaged: Vec<&Link> = links.iter().filter(|link| link.device_b == EXTERNAL_DEVICE).collect();
    assert_eq!(unmanaged.len(), 1);
    assert_eq!(unmanaged[0].device_a, "sw1");
    assert_eq!(unmanaged[0].port_a, et("Et2"));
    assert!(unmanaged[0].port_b.is_unknown());
}

#[tokio::test]
async fn malformed_port_aborts_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let lab = FakeLab::new()
        .neighbor("sw1", "Ethernet1", "sw2", "Ethernet1")
        .neighbor("sw1", "Ethernet2", "mx1.lab.example.com", "xe-0/0/1");
    let renderer = RecordingRenderer::default();
    let cfg = Config {
        graph: Some(GraphLayout::Automatic),
        ..text_only(&dir)
    };

    let result = service(lab, renderer.clone())
        .generate(&devices(&["sw1"]), &cfg)
        .await;

    match result {
        Err(TopologyError::MalformedPortName(name)) => assert_eq!(name, "xe-0/0/1"),
        other => panic!("expected MalformedPortName, got {other:?}"),
    }
    assert!(!dir.path().join(REPORT_FILE).exists());
    assert!(renderer.descriptions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_devices_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let lab = FakeLab::new()
        .neighbor("sw1", "Ethernet1", "sw2", "Ethernet1")
        .port("sw1", "Ethernet1", PortState::Connected)
        .port("sw1", "Ethernet5", PortState::Connected);
    let cfg = Config {
        include_unmanaged: true,
        ..text_only(&dir)
    };

    // sw2 answers neither LLDP nor inventory queries.
    let topology = service(lab, RecordingRenderer::default())
        .build(&devices(&["sw1", "sw2"]), &cfg)
        .await
        .unwrap();

    assert_eq!(
        topology.report_lines(),
        [
            "sw1\t(Et1)\t--------------------\t(Et1)sw2",
            "sw1\t(Et5)\t--------------------\t(unknown)Ixia",
        ]
    );
}

#[tokio::test]
async fn full_run_consolidates_renders_and_delivers() {
    let dir = tempfile::tempdir().unwrap();
    let lab = FakeLab::new()
        .neighbor("leaf-1", "Ethernet1", "spine1.lab.example.com", "Ethernet11")
        .neighbor("leaf-1", "Ethernet2", "spine1.lab.example.com", "Ethernet12")
        .neighbor("leaf-1", "Ethernet3", "spine1.lab.example.com", "Ethernet13")
        .neighbor("spine1", "Ethernet11", "leaf-1.lab.example.com", "Ethernet1")
        .neighbor("spine1", "Ethernet12", "leaf-1.lab.example.com", "Ethernet2")
        .neighbor("spine1", "Ethernet13", "leaf-1.lab.example.com", "Ethernet3")
        .port("leaf-1", "Ethernet1", PortState::Connected)
        .port("leaf-1", "Ethernet2", PortState::Connected)
        .port("leaf-1", "Ethernet3", PortState::Connected)
        .port("leaf-1", "Ethernet7", PortState::Connected)
        .port("leaf-1", "Ethernet8", PortState::Connected)
        .port("leaf-1", "Ethernet9", PortState::Disabled)
        .port("spine1", "Ethernet11", PortState::Connected)
        .port("spine1", "Ethernet12", PortState::Connected)
        .port("spine1", "Ethernet13", PortState::Connected)
        .port("spine1", "Port-Channel1", PortState::Connected);

    let mut tiers = TierMap::new(2);
    tiers.assign("leaf-1", 1).unwrap();
    tiers.assign("spine1", 2).unwrap();
    let cfg = Config {
        graph: Some(GraphLayout::Tiered(tiers)),
        output_dir: dir.path().to_path_buf(),
        ..Config::default()
    };

    let renderer = RecordingRenderer::default();
    let sink = RecordingSink::default();
    let outcome = service(lab, renderer.clone())
        .with_delivery(Box::new(sink.clone()))
        .generate(&devices(&["leaf-1", "spine1"]), &cfg)
        .await
        .unwrap();

    assert_eq!(
        outcome.topology,
        Topology::Consolidated(vec![
            ConsolidatedEdge {
                device_a: "leaf-1".into(),
                device_b: "spine1".into(),
                port_range_a: PortId::span(&et("Et1"), &et("Et3")),
                port_range_b: PortId::span(&et("Et11"), &et("Et13")),
            },
            ConsolidatedEdge {
                device_a: "leaf-1".into(),
                device_b: EXTERNAL_DEVICE.into(),
                port_range_a: PortId::span(&et("Et7"), &et("Et8")),
                port_range_b: PortId::unknown(),
            },
        ])
    );

    let descriptions = renderer.descriptions.lock().unwrap();
    assert_eq!(descriptions.len(), 1);
    assert!(descriptions[0].contains("leaf_1 -> spine1 [ label = \"Et1-3<------>Et11-13\",labelfontsize=0.5 ]"));
    assert!(descriptions[0].contains("leaf_1 -> Ixia [ label = \"Et7-8<------>unknown\",labelfontsize=0.5 ]"));

    let delivered = sink.delivered.lock().unwrap();
    assert_eq!(*delivered, outcome.artifacts);
    assert_eq!(delivered.len(), 2);
    assert!(outcome.rendering_error.is_none());
}

#[tokio::test]
async fn rendering_failure_keeps_the_text_report() {
    let dir = tempfile::tempdir().unwrap();
    let lab = FakeLab::new().neighbor("sw1", "Ethernet1", "sw2", "Ethernet1");
    let renderer = RecordingRenderer {
        fail: true,
        ..RecordingRenderer::default()
    };
    let cfg = Config {
        graph: Some(GraphLayout::Automatic),
        ..text_only(&dir)
    };

    let outcome = service(lab, renderer)
        .generate(&devices(&["sw1"]), &cfg)
        .await
        .unwrap();

    assert!(matches!(outcome.rendering_error, Some(TopologyError::RenderingFailure(_))));
    assert_eq!(outcome.artifacts, [dir.path().join(REPORT_FILE)]);
}

#[tokio::test]
async fn no_targets_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = service(FakeLab::new(), RecordingRenderer::default())
        .build(&[], &text_only(&dir))
        .await;
    assert!(matches!(result, Err(TopologyError::NoTargets)));
}

proptest! {
    #[test]
    fn consolidated_edges_match_distinct_ordered_pairs(
        wiring in prop::collection::vec((0usize..4, 0usize..4, 1u8..48), 0..40),
    ) {
        let names = ["sw1", "sw2", "sw3", EXTERNAL_DEVICE];
        let links: Vec<Link> = wiring
            .iter()
            .filter(|(a, b, _)| a != b)
            .map(|(a, b, port)| Link {
                device_a: names[*a].to_string(),
                port_a: et(&format!("Et{port}")),
                device_b: names[*b].to_string(),
                port_b: et(&format!("Et{}", port + 50)),
            })
            .collect();

        let pairs: HashSet<(&str, &str)> = links
            .iter()
            .map(|link| (link.device_a.as_str(), link.device_b.as_str()))
            .collect();
        let edges = consolidate(&links);

        prop_assert_eq!(edges.len(), pairs.len());
        for edge in &edges {
            prop_assert!(pairs.contains(&(edge.device_a.as_str(), edge.device_b.as_str())));
        }
    }
}
