use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

/// Replay storefront actions and print the resulting view as JSON.
#[derive(Debug, Parser)]
#[command(name = "archiv-replay", version)]
struct Args {
    /// JSON file holding an array of storefront commands.
    script: PathBuf,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,

    /// Print only the derived view, without applied/rejected bookkeeping.
    #[arg(long)]
    view_only: bool,
}

fn main() -> anyhow::Result<()> {
    archiv_observability::init();
    let args = Args::parse();

    let commands = archiv_replay::load_script(&args.script)?;
    let outcome = archiv_replay::replay_archive(&commands)?;

    let rendered = match (args.view_only, args.pretty) {
        (true, true) => serde_json::to_string_pretty(&outcome.view),
        (true, false) => serde_json::to_string(&outcome.view),
        (false, true) => serde_json::to_string_pretty(&outcome),
        (false, false) => serde_json::to_string(&outcome),
    }
    .context("failed to serialize replay outcome")?;

    println!("{rendered}");
    Ok(())
}
