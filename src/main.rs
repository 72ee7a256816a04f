use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use link_sim::{
    BitErrorModel, SimulationConfig,
    common::{CHART_WIDTH, SWEEP_ERROR_PROBABILITIES},
    report, sweep,
};
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about = "Point-to-point link delay and throughput simulation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulates the reference link and prints charts and statistics
    Run {
        /// Seed for reproducible runs, OS entropy if omitted
        #[arg(short, long)]
        seed: Option<u64>,
        /// How bit errors are drawn for each packet
        #[arg(short, long, value_enum, default_value_t = BitErrorModel::PerBit)]
        error_model: BitErrorModel,
        /// Columns of the terminal sparklines
        #[arg(short = 'w', long, default_value_t = CHART_WIDTH)]
        chart_width: usize,
        /// Also write the delay and throughput charts to this SVG file
        #[arg(short, long)]
        plot: Option<PathBuf>,
    },
    /// Repeats the run over a range of bit error probabilities
    Sweep {
        /// Base seed, point `i` uses `seed + i`; OS entropy if omitted
        #[arg(short, long)]
        seed: Option<u64>,
        /// How bit errors are drawn for each packet
        #[arg(short, long, value_enum, default_value_t = BitErrorModel::PerBit)]
        error_model: BitErrorModel,
    },
}

fn seed_or_random(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

fn main() -> link_sim::Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=error", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match Cli::parse().command {
        Command::Run {
            seed,
            error_model,
            chart_width,
            plot,
        } => {
            let seed = seed_or_random(seed);
            let config = SimulationConfig::default().with_error_model(error_model);
            info!(seed, ?error_model, "Starting run");

            let run = link_sim::run(&config, &mut StdRng::seed_from_u64(seed))?;
            println!("{}", report::render(&run, chart_width));

            if let Some(path) = plot {
                link_sim::plot::render_svg(&run, &path)?;
            }
        }
        Command::Sweep { seed, error_model } => {
            let seed = seed_or_random(seed);
            let config = SimulationConfig::default().with_error_model(error_model);
            info!(seed, ?error_model, "Starting sweep");

            let progress = sweep::progress_bar(SWEEP_ERROR_PROBABILITIES.len())?;
            let points = sweep::sweep(&config, &SWEEP_ERROR_PROBABILITIES, seed, &progress)?;
            progress.finish_with_message("Sweep complete");

            println!(
                "{:>10} {:>14} {:>18} {:>12} {:>8}",
                "p", "delay (s)", "throughput (bps)", "errored", "lost"
            );
            for point in points {
                let s = point.summary;
                println!(
                    "{:>10} {:>14.6} {:>18.2} {:>12} {:>8}",
                    point.bit_error_probability,
                    s.average_delay.unwrap_or(0.0),
                    s.average_throughput.unwrap_or(0.0),
                    format!("{}/{}", s.packets_with_errors, s.total_packets),
                    s.lost_packets,
                );
            }
        }
    }

    Ok(())
}
