use crate::reports;
use clap::Args;
use pseudobtag::config::Config;
use pseudobtag::event::{group_events, process_events, read_jets_file, write_jets_file};
use pseudobtag::summary::summarize;
use pseudobtag::{BtResult, ScoreAssigner};
use std::time::Instant;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct AssignArgs {
    #[command(flatten)]
    pub config: Config,

    /// Jets CSV with columns event,pt,eta,flavor
    #[arg(short, long)]
    pub input: String,

    #[arg(short, long)]
    pub output: String,
}

pub fn run(args: AssignArgs, config: Config) -> BtResult<()> {
    let assigner = ScoreAssigner::from_config(&config)?;

    let jets = read_jets_file(&args.input)?;
    let mut events = group_events(jets);

    let seed = config.sources.seed();
    match seed {
        Some(s) => info!("🎲 Seeded random streams (seed {})", s),
        None => info!("🎲 Unseeded random streams"),
    }

    let start = Instant::now();
    process_events(
        &assigner,
        &mut events,
        seed,
        config.sources.signal_flavor,
    );
    let n_jets: usize = events.iter().map(|ev| ev.jets.len()).sum();
    info!(
        "🔥 Scored {} jets in {} events ({:.2?})",
        n_jets,
        events.len(),
        start.elapsed()
    );

    write_jets_file(&args.output, &events)?;

    let scored: Vec<_> = events.into_iter().flat_map(|ev| ev.jets).collect();
    let summary = summarize(
        assigner.pt_bins(),
        assigner.abs_eta_bins(),
        &scored,
        config.sources.signal_flavor,
    );
    reports::print_bin_summary(&summary, assigner.pt_bins(), assigner.abs_eta_bins());
    Ok(())
}
