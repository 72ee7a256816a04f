use indicatif::{ProgressBar, ProgressStyle};
use rand::{SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{
    config::SimulationConfig,
    driver,
    error::Result,
    report::Summary,
};

/// Summary of one run in a sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepPoint {
    /// Bit error probability used for this run
    pub bit_error_probability: f64,
    /// Aggregate statistics of the run
    pub summary: Summary,
}

/// Progress bar styled for a sweep over `len` points.
pub fn progress_bar(len: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("█▓░"),
    );
    Ok(pb)
}

/// Runs `base` once per probability, in parallel.
///
/// Point `i` draws from its own `StdRng` seeded with `seed + i`, so a sweep
/// is reproducible regardless of scheduling. Points come back in input order.
/// `progress` is advanced once per finished point and left for the caller to
/// finish.
#[instrument(skip(base, progress))]
pub fn sweep(
    base: &SimulationConfig,
    probabilities: &[f64],
    seed: u64,
    progress: &ProgressBar,
) -> Result<Vec<SweepPoint>> {
    let configs: Vec<SimulationConfig> = probabilities
        .iter()
        .map(|&p| {
            let config = base.with_bit_error_probability(p);
            config.validate().map(|_| config)
        })
        .collect::<Result<_>>()?;

    let points = configs
        .par_iter()
        .enumerate()
        .map(|(i, config)| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            let run = driver::run(config, &mut rng)?;
            let summary = Summary::of(&run);

            debug!(
                bit_error_probability = config.bit_error_probability,
                lost = summary.lost_packets,
                "Sweep point finished"
            );
            progress.inc(1);

            Ok(SweepPoint {
                bit_error_probability: config.bit_error_probability,
                summary,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{common::SWEEP_ERROR_PROBABILITIES, error::Error};

    fn base() -> SimulationConfig {
        SimulationConfig::default().with_num_packets(200)
    }

    #[test_log::test]
    fn test_sweep_keeps_input_order() {
        let points = sweep(&base(), &SWEEP_ERROR_PROBABILITIES, 1, &ProgressBar::hidden()).unwrap();

        assert_eq!(points.len(), SWEEP_ERROR_PROBABILITIES.len());
        for (point, &p) in points.iter().zip(SWEEP_ERROR_PROBABILITIES.iter()) {
            assert_eq!(point.bit_error_probability, p);
            assert_eq!(point.summary.total_packets, 200);
        }
    }

    #[test_log::test]
    fn test_sweep_is_reproducible() {
        let probabilities = [0.001, 0.004, 0.008];

        let a = sweep(&base(), &probabilities, 99, &ProgressBar::hidden()).unwrap();
        let b = sweep(&base(), &probabilities, 99, &ProgressBar::hidden()).unwrap();

        assert_eq!(a, b);
    }

    #[test_log::test]
    fn test_sweep_extremes() {
        let points = sweep(&base(), &[0.0, 1.0], 5, &ProgressBar::hidden()).unwrap();

        assert_eq!(points[0].summary.lost_packets, 0);
        assert_eq!(points[0].summary.packets_with_errors, 0);
        assert_eq!(points[1].summary.lost_packets, 200);
        assert_eq!(points[1].summary.average_throughput, Some(0.0));
    }

    #[test_log::test]
    fn test_sweep_rejects_before_running() {
        let progress = ProgressBar::hidden();
        let result = sweep(&base(), &[0.001, 1.5], 0, &progress);

        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
        assert_eq!(progress.position(), 0);
    }

    #[test_log::test]
    fn test_progress_counts_points() {
        let progress = ProgressBar::hidden();
        sweep(&base(), &[0.001, 0.002, 0.003], 3, &progress).unwrap();

        assert_eq!(progress.position(), 3);
    }

    #[test_log::test]
    fn test_progress_bar_style() {
        let pb = progress_bar(4).unwrap();

        assert_eq!(pb.length(), Some(4));
    }
}
