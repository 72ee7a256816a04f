use rand::Rng;
use tracing::debug;

use crate::{
    config::SimulationConfig,
    error::Result,
    link::{LinkSimulator, PacketResult},
};

/// Results of one run, indexed by packet sequence number.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimulationRun {
    results: Vec<PacketResult>,
}

impl SimulationRun {
    /// Number of simulated packets.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no packet was simulated.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Result of packet `index`.
    pub fn get(&self, index: usize) -> Option<&PacketResult> {
        self.results.get(index)
    }

    /// Results in transmission order.
    pub fn iter(&self) -> impl Iterator<Item = &PacketResult> {
        self.results.iter()
    }

    /// Results in transmission order.
    pub fn results(&self) -> &[PacketResult] {
        &self.results
    }

    /// Total delay of every packet.
    pub fn delays(&self) -> Vec<f64> {
        self.iter().map(|p| p.total_delay).collect()
    }

    /// Throughput of every packet.
    pub fn throughputs(&self) -> Vec<f64> {
        self.iter().map(|p| p.throughput).collect()
    }

    /// Error count of every packet.
    pub fn error_counts(&self) -> Vec<u64> {
        self.iter().map(|p| p.error_count).collect()
    }
}

impl<'a> IntoIterator for &'a SimulationRun {
    type Item = &'a PacketResult;
    type IntoIter = std::slice::Iter<'a, PacketResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// Transmits `config.num_packets` packets one after another.
///
/// The config is validated before the first packet, so an invalid config
/// never yields a partial run.
pub fn run<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> Result<SimulationRun> {
    let link = LinkSimulator::new(config)?;
    debug!(
        num_packets = config.num_packets,
        bit_error_probability = config.bit_error_probability,
        error_model = ?config.error_model,
        "Simulation initialized"
    );

    let mut results = Vec::with_capacity(config.num_packets);
    for _ in 0..config.num_packets {
        results.push(link.transmit_packet(rng));
    }

    let lost = results.iter().filter(|p| p.lost).count();
    debug!(packets = results.len(), lost, "Simulation finished");

    Ok(SimulationRun { results })
}
