pub mod generate;
pub mod targets;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use topogen_common::config::{DEFAULT_POOL, DEFAULT_QUERY_TIMEOUT, DEFAULT_RENDER_FORMAT, parse_tier};

#[derive(Parser)]
#[command(name = "topogen")]
#[command(about = "Builds a lab topology from LLDP neighbor tables.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce output (-q warnings only, -qq errors only)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover adjacency and write the text and graph topology
    #[command(alias = "g")]
    Generate(GenerateArgs),
    /// Show which devices a run would query
    #[command(alias = "t")]
    Targets(TargetArgs),
}

#[derive(Args, Clone)]
pub struct TargetArgs {
    /// Use the DUTs this user owns in the pool (takes priority over --file)
    #[arg(short, long)]
    pub user: Option<String>,

    /// Pool searched for the user's DUTs
    #[arg(short, long, default_value = DEFAULT_POOL)]
    pub pool: String,

    /// DUT list, one device per line (default: ~/setup.txt)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Snapshot directory holding per-device LLDP and interface output
    #[arg(short, long, default_value = ".")]
    pub snapshot: PathBuf,

    /// Devices to leave out of the topology
    #[arg(short = 'x', long, num_args = 1..)]
    pub exclude: Vec<String>,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub targets: TargetArgs,

    /// Only write the text topology
    #[arg(short = 'g', long)]
    pub no_graph: bool,

    /// Leave port names off the graph edges
    #[arg(short = 'n', long)]
    pub no_port_labels: bool,

    /// Draw every link separately instead of grouping them per device pair
    #[arg(short = 'c', long)]
    pub no_consolidation: bool,

    /// Leave out ports without an LLDP neighbor (Ixia connections)
    #[arg(short = 'i', long)]
    pub no_ixia: bool,

    /// Number of tiers for a layered layout (leaf-spine is 2)
    #[arg(long)]
    pub levels: Option<u8>,

    /// Tier of a device in the layered layout, 1 being the lowest
    #[arg(long = "tier", value_name = "DEVICE=TIER", value_parser = parse_tier)]
    pub tiers: Vec<(String, u8)>,

    /// Graphviz output format
    #[arg(long, default_value = DEFAULT_RENDER_FORMAT)]
    pub format: String,

    /// Directory receiving the generated files
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Also copy the generated files into this directory
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Seconds to wait for a single device before skipping it
    #[arg(long, default_value_t = DEFAULT_QUERY_TIMEOUT.as_secs())]
    pub timeout: u64,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
