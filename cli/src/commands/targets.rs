use topogen_core::snapshot::SnapshotSource;
use topogen_core::targets::{self, TargetSource};

use crate::commands::TargetArgs;
use crate::terminal::print;

/// Resolves the device list without querying any device.
pub async fn resolve(args: &TargetArgs) -> anyhow::Result<Vec<String>> {
    let source = TargetSource::select(args.user.clone(), &args.pool, args.file.clone());
    let directory = SnapshotSource::new(&args.snapshot);

    Ok(targets::resolve_targets(&source, &directory, &args.exclude).await?)
}

pub async fn targets(args: TargetArgs, q_level: u8) -> anyhow::Result<()> {
    let devices = resolve(&args).await?;

    print::header("target devices", q_level);
    for (idx, device) in devices.iter().enumerate() {
        print::tree_head(idx, device);
    }
    Ok(())
}
