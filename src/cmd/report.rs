use crate::reports;
use clap::Args;
use pseudobtag::config::Config;
use pseudobtag::event::read_jets_file;
use pseudobtag::summary::{parse_window, summarize, window_histogram};
use pseudobtag::BtResult;

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub config: Config,

    /// Scored jets CSV written by `assign`
    #[arg(short, long)]
    pub input: String,

    #[arg(long, default_value = "20,1000")]
    pub pt_window: String,

    #[arg(long, default_value = "0.0,2.5")]
    pub eta_window: String,

    #[arg(long, default_value_t = 20)]
    pub bins: usize,
}

pub fn run(args: ReportArgs, config: Config) -> BtResult<()> {
    let pt_window = parse_window(&args.pt_window, "pt-window")?;
    let eta_window = parse_window(&args.eta_window, "eta-window")?;

    let jets = read_jets_file(&args.input)?;
    let hist = window_histogram(&jets, pt_window, eta_window, args.bins)?;
    reports::print_window_histogram(&hist, pt_window, eta_window);

    let pt_bins = config.binning.pt_table()?;
    let abs_eta_bins = config.binning.abs_eta_table()?;
    let summary = summarize(&pt_bins, &abs_eta_bins, &jets, config.sources.signal_flavor);
    reports::print_bin_summary(&summary, &pt_bins, &abs_eta_bins);
    Ok(())
}
