use clap::Args;
use pseudobtag::config::Config;
use pseudobtag::synth::{write_grid, SynthParams};
use pseudobtag::{BtResult, ClassLabel};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub synth: SynthParams,
}

pub fn run(args: GenerateArgs, config: Config) -> BtResult<()> {
    let n_pt = config.binning.pt_table()?.n_bins();
    let n_eta = config.binning.abs_eta_table()?.n_bins();

    info!(
        "🧪 Generating {}x{} cells, {} bins, {} entries each",
        n_eta, n_pt, args.synth.bins, args.synth.entries
    );

    write_grid(
        &config.sources.signal_file,
        ClassLabel::Signal,
        n_eta,
        n_pt,
        &args.synth,
    )?;
    write_grid(
        &config.sources.background_file,
        ClassLabel::Background,
        n_eta,
        n_pt,
        &args.synth,
    )?;
    Ok(())
}
