use std::fmt::{self, Display};

use crate::driver::SimulationRun;

static LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Aggregate statistics of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    /// Mean total delay in seconds, `None` for an empty run
    pub average_delay: Option<f64>,
    /// Mean throughput in bps, `None` for an empty run
    pub average_throughput: Option<f64>,
    /// Packets with at least one bit error
    pub packets_with_errors: usize,
    /// Packets over the error threshold
    pub lost_packets: usize,
    /// Simulated packets
    pub total_packets: usize,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

impl Summary {
    /// Summarizes `run`.
    pub fn of(run: &SimulationRun) -> Self {
        Self {
            average_delay: mean(run.iter().map(|p| p.total_delay)),
            average_throughput: mean(run.iter().map(|p| p.throughput)),
            packets_with_errors: run.iter().filter(|p| p.has_errors()).count(),
            lost_packets: run.iter().filter(|p| p.lost).count(),
            total_packets: run.len(),
        }
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.average_delay {
            Some(delay) => writeln!(f, "Average delay: {delay:.6} seconds")?,
            None => writeln!(f, "Average delay: n/a")?,
        }
        match self.average_throughput {
            Some(throughput) => writeln!(f, "Average throughput: {throughput:.2} bps")?,
            None => writeln!(f, "Average throughput: n/a")?,
        }
        write!(
            f,
            "Packets with errors: {} / {}",
            self.packets_with_errors, self.total_packets
        )
    }
}

/// Renders `values` against packet index as a one-line terminal sparkline.
///
/// Packets are grouped into at most `width` consecutive buckets; each column
/// is the bucket mean scaled between the series minimum and maximum.
pub fn chart(title: &str, y_label: &str, values: &[f64], width: usize) -> String {
    if values.is_empty() || width == 0 {
        return format!("{title}\n{y_label}: no packets");
    }

    let buckets = width.min(values.len());
    let columns: Vec<f64> = (0..buckets)
        .map(|i| {
            let start = i * values.len() / buckets;
            let end = (i + 1) * values.len() / buckets;
            values[start..end].iter().sum::<f64>() / (end - start) as f64
        })
        .collect();

    let min = columns.iter().copied().fold(f64::INFINITY, f64::min);
    let max = columns.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    let line: String = columns
        .iter()
        .map(|&v| {
            if range > 0.0 {
                let level = ((v - min) / range * (LEVELS.len() - 1) as f64).round() as usize;
                LEVELS[level.min(LEVELS.len() - 1)]
            } else {
                LEVELS[LEVELS.len() / 2]
            }
        })
        .collect();

    format!(
        "{title}\n{y_label}  [{min:.6} .. {max:.6}]\n{line}\nPacket # 0..{}",
        values.len() - 1
    )
}

/// Delay and throughput sparklines followed by the summary, as printed by `run`.
pub fn render(run: &SimulationRun, width: usize) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        chart("Transmission Delay", "Delay (s)", &run.delays(), width),
        chart(
            "Throughput Over Time",
            "Throughput (bps)",
            &run.throughputs(),
            width
        ),
        Summary::of(run)
    )
}
