mod commands;

use crate::commands::{apportion, convert, info, OutputFormat};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use seat_apportionment::formats::pl_pkw::CategoryOverrides;
use seat_apportionment::{ApportionmentMethod, NamedMethod, Thresholds};
use std::path::PathBuf;

#[derive(Parser)]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert PKW CSV exports into an election file.
    Convert {
        /// Directory holding constituencies.csv and votes.csv
        raw_data_dir: PathBuf,
        /// Election file to write
        output: PathBuf,
        /// Committee (display name) to treat as a coalition
        #[clap(long, value_name = "NAME")]
        coalition: Vec<String>,
        /// Committee (display name) to treat as a national minority
        #[clap(long, value_name = "NAME")]
        minority: Vec<String>,
    },
    /// Validate and dump info about an election file.
    Info {
        /// Election file
        election_file: PathBuf,
        #[clap(flatten)]
        thresholds: ThresholdArgs,
    },
    /// Compute seat allocations.
    Apportion {
        /// Election file
        election_file: PathBuf,
        #[clap(flatten)]
        thresholds: ThresholdArgs,
        /// Method to run; repeat for several. Defaults to all of them.
        #[clap(long = "method", value_enum)]
        methods: Vec<MethodName>,
        /// Output format
        #[clap(long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Include the allocation in every constituency
        #[clap(long)]
        per_constituency: bool,
    },
}

#[derive(Args)]
struct ThresholdArgs {
    /// Threshold for standard committees [default: 0.05]
    #[clap(long, short = 'b')]
    base_threshold: Option<f64>,
    /// Threshold for coalitions [default: 0.08]
    #[clap(long, short = 'c')]
    coalition_threshold: Option<f64>,
    /// Threshold for national minority committees [default: 0]
    #[clap(long, short = 'm')]
    minority_threshold: Option<f64>,
}

impl ThresholdArgs {
    fn thresholds(&self) -> Thresholds {
        let defaults = Thresholds::default();
        Thresholds {
            base: self.base_threshold.unwrap_or(defaults.base),
            coalition: self.coalition_threshold.unwrap_or(defaults.coalition),
            minority: self.minority_threshold.unwrap_or(defaults.minority),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MethodName {
    Dhondt,
    SainteLague,
    Hare,
    Droop,
    HagenbachBischoff,
    Imperiali,
}

impl From<MethodName> for ApportionmentMethod {
    fn from(name: MethodName) -> Self {
        match name {
            MethodName::Dhondt => ApportionmentMethod::D_HONDT,
            MethodName::SainteLague => ApportionmentMethod::SAINTE_LAGUE,
            MethodName::Hare => ApportionmentMethod::HARE,
            MethodName::Droop => ApportionmentMethod::DROOP,
            MethodName::HagenbachBischoff => ApportionmentMethod::HAGENBACH_BISCHOFF,
            MethodName::Imperiali => ApportionmentMethod::IMPERIALI,
        }
    }
}

fn selected_methods(names: &[MethodName]) -> Vec<NamedMethod> {
    if names.is_empty() {
        return NamedMethod::standard_set();
    }
    names
        .iter()
        .map(|name| NamedMethod::from(ApportionmentMethod::from(*name)))
        .collect()
}

#[tokio::main]
async fn main() {
    init_tracing();
    let opts = Opts::parse();

    match opts.command {
        Command::Convert {
            raw_data_dir,
            output,
            coalition,
            minority,
        } => {
            let overrides = CategoryOverrides {
                coalition,
                minority,
            };
            if let Err(e) = convert(&raw_data_dir, &output, &overrides) {
                eprintln!("{} {}", "❌ Conversion failed:".red(), e);
                std::process::exit(1);
            }
        }
        Command::Info {
            election_file,
            thresholds,
        } => {
            if let Err(e) = info(&election_file, thresholds.thresholds()) {
                eprintln!("{} {}", "❌ Validation failed:".red(), e);
                std::process::exit(1);
            }
        }
        Command::Apportion {
            election_file,
            thresholds,
            methods,
            format,
            per_constituency,
        } => {
            if let Err(e) = apportion(
                &election_file,
                thresholds.thresholds(),
                selected_methods(&methods),
                format,
                per_constituency,
            )
            .await
            {
                eprintln!("{} {}", "❌ Apportionment failed:".red(), e);
                std::process::exit(1);
            }
        }
    }
}

/// Diagnostics go to stderr so stdout stays clean for reports.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("seat_apportionment=warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
