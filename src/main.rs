use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use vbs_histos::error::{HistError, Result};
use vbs_histos::{BosonMode, LeptonChannel, RunConfig};

/// Book and fill weighted histograms of a sample bundle for one region.
#[derive(Debug, Parser)]
#[command(name = "make-hists", version)]
struct Args {
    /// Sample bundle directory (holds bundle.yaml)
    #[arg(long, default_value = "df_step1")]
    dframes: PathBuf,

    /// Lepton channel, e or m
    #[arg(long, default_value = "m")]
    lepton: String,

    /// W or Z
    #[arg(long, default_value = "W")]
    boson: String,

    #[arg(long, default_value = "signal_loose_W")]
    region: String,

    /// Output file, defaults to {region}_{lepton}.json
    #[arg(long, default_value = "")]
    output: String,

    /// YAML histogram list replacing the built-in one
    #[arg(long)]
    histograms: Option<PathBuf>,

    /// Extra category filled per sample, as NAME:COLUMN with a boolean column
    #[arg(long = "sub-key")]
    sub_keys: Vec<String>,

    /// Fill partitions in parallel
    #[arg(long)]
    parallel: bool,
}

fn parse_sub_key(arg: &str) -> Result<(String, String)> {
    match arg.split_once(':') {
        Some((name, column)) if !name.is_empty() && !column.is_empty() => {
            Ok((name.to_owned(), column.to_owned()))
        }
        _ => Err(HistError::config(format!(
            "sub-key '{arg}' is not of the form NAME:COLUMN"
        ))),
    }
}

fn run_config(args: Args) -> Result<RunConfig> {
    let lepton: LeptonChannel = args.lepton.parse()?;
    let boson: BosonMode = args.boson.parse()?;

    let mut config = RunConfig::new(args.dframes, lepton, boson, &args.region);
    if !args.output.is_empty() {
        config.output = Some(PathBuf::from(args.output));
    }
    config.histograms = args.histograms;
    config.sub_keys = args
        .sub_keys
        .iter()
        .map(|s| parse_sub_key(s))
        .collect::<Result<Vec<_>>>()?;
    config.parallel = args.parallel;
    Ok(config)
}

fn main() -> ExitCode {
    env_logger::init(); // Log to stderr, e.g. RUST_LOG=info make-hists --region top_cr_W

    let result = run_config(Args::parse()).and_then(|config| vbs_histos::app::run(&config));
    match result {
        Ok(path) => {
            log::info!("Histograms written to {path:?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("make-hists: {e}");
            ExitCode::FAILURE
        }
    }
}
