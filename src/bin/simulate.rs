//! Pack completion simulator CLI.
//!
//! Run Monte Carlo simulations of collectors opening packs until every
//! collection is complete.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                          # 500 currency-assisted runs
//!   cargo run --bin simulate -- -n 2000 -s greedy-all # 2000 greedy runs
//!   cargo run --bin simulate -- --seed 42 --json      # Reproducible run, JSON saved

use anyhow::Context;
use clap::{ArgAction, Parser};
use packsim::build_info;
use packsim::core::constants::{DEFAULT_BIN_WIDTH, DEFAULT_NUM_RUNS, POINTS_PER_PACK};
use packsim::simulator::{run_batch, SimConfig, SimReport, Strategy};
use packsim::{SetupFile, Simulation};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "simulate",
    version = env!("PACKSIM_LONG_VERSION"),
    about = "Estimate how many packs it takes to complete a card collection"
)]
struct Cli {
    /// Number of simulation runs
    #[arg(short = 'n', long, default_value_t = DEFAULT_NUM_RUNS)]
    runs: u32,

    /// Completion strategy every run uses
    #[arg(short, long, value_enum, default_value_t = Strategy::CurrencyAssisted)]
    strategy: Strategy,

    /// Random seed for reproducibility
    #[arg(long, env = "PACKSIM_SEED")]
    seed: Option<u64>,

    /// Pack points earned per opened pack
    #[arg(long, default_value_t = POINTS_PER_PACK)]
    points_per_pack: u64,

    /// Histogram bin width, in packs
    #[arg(long, default_value_t = DEFAULT_BIN_WIDTH)]
    bin_width: u64,

    /// Price of one pack, for the cost estimate
    #[arg(long)]
    pack_cost: Option<f64>,

    /// JSON file with a custom catalog and odds
    #[arg(long, value_name = "FILE")]
    setup: Option<PathBuf>,

    /// Print the built-in setup as JSON and exit
    #[arg(long)]
    dump_setup: bool,

    /// Save a JSON report (default name: sim_report_<timestamp>.json)
    #[arg(long, value_name = "FILE")]
    json: Option<Option<PathBuf>>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only print the report
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn sim_config(&self) -> SimConfig {
        SimConfig {
            num_runs: self.runs,
            seed: self.seed,
            strategy: self.strategy,
            points_per_pack: self.points_per_pack,
            bin_width: self.bin_width,
            pack_cost: self.pack_cost,
        }
    }

    fn log_filter(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "packsim=error,simulate=error",
            (false, 0) => "packsim=warn,simulate=warn",
            (false, 1) => "packsim=info,simulate=info",
            (false, 2) => "packsim=debug,simulate=debug",
            _ => "packsim=trace,simulate=trace",
        }
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_simulation(setup: Option<&PathBuf>) -> anyhow::Result<Simulation> {
    match setup {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading setup file");
            SetupFile::load(path)
                .and_then(SetupFile::into_simulation)
                .with_context(|| format!("invalid setup file {}", path.display()))
        }
        None => Simulation::standard().context("built-in setup is invalid"),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_filter());

    if cli.dump_setup {
        println!("{}", SetupFile::standard().to_json());
        return Ok(());
    }

    let sim = load_simulation(cli.setup.as_ref())?;
    let config = cli.sim_config();

    if !cli.quiet {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              PACK COMPLETION SIMULATOR                        ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!("  Version:        {}", build_info::version_string());
        println!();
        println!("Configuration:");
        println!("  Runs:           {}", config.num_runs);
        println!("  Strategy:       {}", config.strategy);
        println!("  Collections:    {}", sim.catalog().collections().join(", "));
        println!("  Cards:          {}", sim.catalog().len());
        if config.strategy == Strategy::CurrencyAssisted {
            println!("  Points/Pack:    {}", config.points_per_pack);
        }
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
        println!("Running simulation...");
        println!();
    }

    let batch = run_batch(&sim, &config);
    let report = SimReport::from_batch(&batch, &config);

    println!("{}", report.to_text());

    if let Some(target) = &cli.json {
        let path = target.clone().unwrap_or_else(|| {
            PathBuf::from(format!(
                "sim_report_{}.json",
                chrono::Utc::now().format("%Y%m%d_%H%M%S")
            ))
        });
        std::fs::write(&path, report.to_json())
            .with_context(|| format!("failed to write JSON report to {}", path.display()))?;
        println!("JSON report saved to: {}", path.display());
    }

    if batch.records.is_empty() && !batch.failures.is_empty() {
        anyhow::bail!("every run failed; first error: {}", batch.failures[0].error);
    }

    Ok(())
}
