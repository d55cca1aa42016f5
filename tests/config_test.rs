use clap::{CommandFactory, FromArgMatches, Parser};
use pseudobtag::config::{BinningParams, Config, SourceParams};
use pseudobtag::label::B_FLAVOR;
use pseudobtag::BtagError;
use std::io::Write;
use tempfile::NamedTempFile;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    config: Config,
}

fn parse_cli(args: &[&str]) -> (Config, clap::ArgMatches) {
    let mut full = vec!["test"];
    full.extend_from_slice(args);
    let matches = TestCli::command().get_matches_from(full);
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli.config, matches)
}

fn write_json(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_defaults_build_standard_grid() {
    let config = Config::default();
    let pt = config.binning.pt_table().unwrap();
    let eta = config.binning.abs_eta_table().unwrap();
    assert_eq!(pt.n_bins(), 9);
    assert_eq!(eta.n_bins(), 5);
    assert_eq!(config.sources.signal_flavor, B_FLAVOR);
    assert_eq!(config.sources.seed(), None);
}

#[test]
fn test_clap_defaults_match_serde_defaults() {
    let (cli, _) = parse_cli(&[]);
    let def = Config::default();
    assert_eq!(cli.binning.pt_bins, def.binning.pt_bins);
    assert_eq!(cli.binning.abs_eta_bins, def.binning.abs_eta_bins);
    assert_eq!(cli.sources.signal_file, def.sources.signal_file);
    assert_eq!(cli.sources.background_file, def.sources.background_file);
    assert_eq!(cli.sources.random_seed, def.sources.random_seed);
    assert_eq!(cli.sources.signal_flavor, def.sources.signal_flavor);
}

#[test]
fn test_seed_zero_means_unseeded() {
    let mut sources = SourceParams::default();
    assert_eq!(sources.seed(), None);
    sources.random_seed = 42;
    assert_eq!(sources.seed(), Some(42));
}

#[test]
fn test_load_partial_json_keeps_defaults() {
    let file = write_json(r#"{ "sources": { "random_seed": 7, "signal_file": "b.csv" } }"#);
    let config = Config::load_from_file(file.path()).unwrap();
    assert_eq!(config.sources.random_seed, 7);
    assert_eq!(config.sources.signal_file, "b.csv");
    assert_eq!(config.sources.background_file, "data/distrib_nonb.csv");
    assert_eq!(config.binning.pt_bins, BinningParams::default().pt_bins);
}

#[test]
fn test_load_rejects_bad_json() {
    let file = write_json("{ not json");
    let err = Config::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, BtagError::Json(_)));
}

#[test]
fn test_load_missing_file() {
    let err = Config::load_from_file("/no/such/config.json").unwrap_err();
    assert!(matches!(err, BtagError::Config(_)));
}

#[test]
fn test_cli_flags_override_file_values_only_when_typed() {
    let file = write_json(
        r#"{ "binning": { "pt_bins": "0,100" }, "sources": { "random_seed": 3, "signal_flavor": 4 } }"#,
    );
    let mut config = Config::load_from_file(file.path()).unwrap();
    let (cli, matches) = parse_cli(&["--random-seed", "99", "--abs-eta-bins", "0,1,2"]);
    config.merge_from_cli(&cli, &matches);

    assert_eq!(config.sources.random_seed, 99);
    assert_eq!(config.binning.abs_eta_bins, "0,1,2");
    // untouched on the command line, so the file wins over clap defaults
    assert_eq!(config.binning.pt_bins, "0,100");
    assert_eq!(config.sources.signal_flavor, 4);
}

#[test]
fn test_negative_signal_flavor_parses() {
    let (cli, _) = parse_cli(&["--signal-flavor", "-5"]);
    assert_eq!(cli.sources.signal_flavor, -5);
}

#[test]
fn test_abs_eta_bins_must_start_non_negative() {
    let binning = BinningParams {
        abs_eta_bins: "-1,0,1".to_string(),
        ..Default::default()
    };
    assert!(binning.abs_eta_table().is_err());
}

#[test]
fn test_bad_pt_edges_are_config_errors() {
    let binning = BinningParams {
        pt_bins: "50,20".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        binning.pt_table().unwrap_err(),
        BtagError::Config(_)
    ));
}
