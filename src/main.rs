use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use pseudobtag::config::Config;
use pseudobtag::BtResult;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file; explicit flags override its values
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assign pseudo b-tag scores to every jet of a jets CSV file
    Assign(cmd::assign::AssignArgs),
    /// Write example signal/background histogram files
    Generate(cmd::generate::GenerateArgs),
    /// Histogram assigned scores inside one (pT, |eta|) window
    Report(cmd::report::ReportArgs),
}

fn resolve_config(cli: &Cli, matches: &clap::ArgMatches) -> BtResult<Config> {
    let cli_config = match &cli.command {
        Commands::Assign(args) => &args.config,
        Commands::Generate(args) => &args.config,
        Commands::Report(args) => &args.config,
    };

    let Some(path) = &cli.config_file else {
        return Ok(cli_config.clone());
    };

    info!("⚖️  Loading config from: {}", path);
    let mut config = Config::load_from_file(path)?;
    if let Some((_, sub_matches)) = matches.subcommand() {
        config.merge_from_cli(cli_config, sub_matches);
    }
    Ok(config)
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚀 Initializing pseudo b-tag scorer...");

    let config = resolve_config(&cli, &matches).unwrap_or_else(|e| {
        error!("❌ {}", e);
        process::exit(1);
    });

    let result = match cli.command {
        Commands::Assign(args) => cmd::assign::run(args, config),
        Commands::Generate(args) => cmd::generate::run(args, config),
        Commands::Report(args) => cmd::report::run(args, config),
    };

    if let Err(e) = result {
        error!("\n❌ FATAL ERROR:");
        error!("   {}", e);
        process::exit(1);
    }
}
