use std::time::{Duration, Instant};

use colored::*;
use topogen_common::config::{Config, GraphLayout, TierMap};
use topogen_common::error::TopologyError;
use topogen_core::export::DirectoryExport;
use topogen_core::pipeline::{GenerationOutcome, TopologyService};
use topogen_core::render::Graphviz;
use topogen_core::snapshot::SnapshotSource;
use tracing::warn;

use crate::commands::{GenerateArgs, targets};
use crate::terminal::{colors, print, spinner};

pub async fn generate(args: GenerateArgs, q_level: u8) -> anyhow::Result<()> {
    let cfg = to_config(&args, q_level)?;
    let devices = targets::resolve(&args.targets).await?;

    std::fs::create_dir_all(&cfg.output_dir).map_err(|source| TopologyError::Output {
        path: cfg.output_dir.clone(),
        source,
    })?;

    print::caveats(q_level);
    print::header("querying devices", q_level);

    let snapshot = SnapshotSource::new(&args.targets.snapshot);
    let mut service = TopologyService::new(
        Box::new(snapshot.clone()),
        Box::new(snapshot),
        Box::new(Graphviz::new(cfg.render_format.as_str())),
    )
    .on_device(Box::new(spinner::report_device));

    if let Some(dir) = &cfg.export_dir {
        service = service.with_delivery(Box::new(DirectoryExport::new(dir)));
    }

    let start_time = Instant::now();
    let result = service.generate(&devices, &cfg).await;
    spinner::finish();

    generation_ends(&result?, start_time.elapsed(), &cfg);
    Ok(())
}

/// Turns the flags into the run configuration, validating the tier layout up front.
fn to_config(args: &GenerateArgs, q_level: u8) -> Result<Config, TopologyError> {
    let graph = if args.no_graph {
        None
    } else {
        Some(layout(args)?)
    };

    Ok(Config {
        include_unmanaged: !args.no_ixia,
        consolidate: !args.no_consolidation,
        port_labels: !args.no_port_labels,
        graph,
        render_format: args.format.clone(),
        query_timeout: Duration::from_secs(args.timeout),
        output_dir: args.output_dir.clone(),
        export_dir: args.export.clone(),
        quiet: q_level,
    })
}

fn layout(args: &GenerateArgs) -> Result<GraphLayout, TopologyError> {
    let levels = match args.levels {
        Some(levels) => levels,
        None if args.tiers.is_empty() => return Ok(GraphLayout::Automatic),
        None => {
            let inferred = args.tiers.iter().map(|(_, tier)| *tier).max().unwrap_or(1);
            let conflict = TopologyError::ConfigConflict("--tier given without --levels".into());
            warn!("{conflict}; assuming {inferred} level(s)");
            inferred
        }
    };

    let mut tiers = TierMap::new(levels);
    for (device, tier) in &args.tiers {
        tiers.assign(device.as_str(), *tier)?;
    }
    Ok(GraphLayout::Tiered(tiers))
}

fn generation_ends(outcome: &GenerationOutcome, total_time: Duration, cfg: &Config) {
    if outcome.topology.is_empty() {
        print::header("no links found", cfg.quiet);
        print::no_results();
        return;
    }

    print::header("topology", cfg.quiet);
    for line in outcome.topology.report_lines() {
        print::print(&line);
    }

    print::header("generated files", cfg.quiet);
    for artifact in &outcome.artifacts {
        print::print_status(artifact.display().to_string());
    }

    let edges: ColoredString = format!("{} edges", outcome.topology.len()).bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output = format!("Topology Complete: {edges} drawn in {total_time}").color(colors::TEXT_DEFAULT);

    print::fat_separator();
    print::centerln(&output.to_string());
}
