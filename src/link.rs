use rand::Rng;
use rand_distr::{Binomial, Distribution};
use tracing::{instrument, trace};

use crate::{
    config::{BitErrorModel, SimulationConfig},
    error::{ConfigError, Result},
};

/// Outcome of a single simulated packet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PacketResult {
    /// Transmission + propagation delay, plus the retransmission penalty if lost
    pub total_delay: f64,
    /// Bits per second delivered, zero for a lost packet
    pub throughput: f64,
    /// Flipped bits in the packet
    pub error_count: u64,
    /// Error count exceeded the threshold
    pub lost: bool,
}

impl PacketResult {
    /// Whether at least one bit was flipped.
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}

enum ErrorSource {
    PerBit,
    Binomial(Binomial),
}

/// Point-to-point link with independent bit errors.
///
/// Each call to [`LinkSimulator::transmit_packet`] is an independent trial;
/// the only state shared between packets is the caller's random source.
pub struct LinkSimulator<'a> {
    config: &'a SimulationConfig,
    errors: ErrorSource,
}

impl<'a> LinkSimulator<'a> {
    /// Creates a link, rejecting configs that would divide by zero or
    /// sample an impossible probability.
    pub fn new(config: &'a SimulationConfig) -> Result<Self> {
        config.validate()?;

        let errors = match config.error_model {
            BitErrorModel::PerBit => ErrorSource::PerBit,
            BitErrorModel::Binomial => ErrorSource::Binomial(
                Binomial::new(config.packet_size_bits, config.bit_error_probability)
                    .map_err(|_| ConfigError::BitErrorProbability(config.bit_error_probability))?,
            ),
        };

        Ok(Self { config, errors })
    }

    /// Config this link was built from.
    pub fn config(&self) -> &SimulationConfig {
        self.config
    }

    /// Number of flipped bits in one packet.
    pub fn count_bit_errors<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        match &self.errors {
            ErrorSource::PerBit => {
                let p = self.config.bit_error_probability;
                let mut errors = 0;

                for _ in 0..self.config.packet_size_bits {
                    let r: f64 = rng.random();

                    if r < p {
                        errors += 1;
                    }
                }

                errors
            }
            ErrorSource::Binomial(binomial) => binomial.sample(rng),
        }
    }

    /// Simulates the transmission of one packet.
    ///
    /// A packet with more errors than the threshold is charged the fixed
    /// retransmission delay and delivers no throughput. No second attempt is
    /// drawn.
    #[instrument(level = "trace", skip_all)]
    pub fn transmit_packet<R: Rng + ?Sized>(&self, rng: &mut R) -> PacketResult {
        let error_count = self.count_bit_errors(rng);
        let lost = error_count > self.config.error_threshold;

        let mut total_delay = self.config.transmission_delay() + self.config.propagation_delay;
        if lost {
            total_delay += self.config.retransmission_delay;
        }

        let throughput = if lost {
            0.0
        } else {
            self.config.packet_size_bits as f64 / total_delay
        };

        trace!(error_count, lost, total_delay, throughput, "Packet transmitted");

        PacketResult {
            total_delay,
            throughput,
            error_count,
            lost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rand::{SeedableRng, rngs::StdRng};

    fn reference() -> SimulationConfig {
        SimulationConfig::default()
            .with_bit_rate(1e6)
            .with_packet_size_bits(1000)
            .with_propagation_delay(0.001)
            .with_error_threshold(5)
            .with_retransmission_delay(0.002)
    }

    #[test_log::test]
    fn test_error_free_link() {
        for model in [BitErrorModel::PerBit, BitErrorModel::Binomial] {
            let config = reference()
                .with_bit_error_probability(0.0)
                .with_error_model(model);
            let link = LinkSimulator::new(&config).unwrap();
            let mut rng = StdRng::seed_from_u64(1);

            for _ in 0..100 {
                let packet = link.transmit_packet(&mut rng);

                assert_eq!(packet.error_count, 0);
                assert!(!packet.has_errors());
                assert!(!packet.lost);
                assert!((packet.total_delay - 0.002).abs() < 1e-12);
                assert!((packet.throughput - 500_000.0).abs() < 1e-6);
            }
        }
    }

    #[test_log::test]
    fn test_always_corrupted_link() {
        for model in [BitErrorModel::PerBit, BitErrorModel::Binomial] {
            let config = reference()
                .with_bit_error_probability(1.0)
                .with_error_model(model);
            let link = LinkSimulator::new(&config).unwrap();
            let mut rng = StdRng::seed_from_u64(2);

            for _ in 0..20 {
                let packet = link.transmit_packet(&mut rng);

                assert_eq!(packet.error_count, config.packet_size_bits);
                assert!(packet.lost);
                assert_eq!(packet.throughput, 0.0);

                let expected = config.transmission_delay()
                    + config.propagation_delay
                    + config.retransmission_delay;
                assert!((packet.total_delay - expected).abs() < 1e-12);
            }
        }
    }

    #[test_log::test]
    fn test_delay_and_throughput_invariants() {
        for model in [BitErrorModel::PerBit, BitErrorModel::Binomial] {
            // High enough that both lost and delivered packets show up.
            let config = reference()
                .with_bit_error_probability(0.005)
                .with_error_model(model);
            let link = LinkSimulator::new(&config).unwrap();
            let mut rng = StdRng::seed_from_u64(3);
            let base_delay = config.transmission_delay() + config.propagation_delay;

            let (mut lost, mut delivered) = (0, 0);
            for _ in 0..500 {
                let packet = link.transmit_packet(&mut rng);

                assert!(packet.error_count <= config.packet_size_bits);
                assert!(packet.total_delay >= base_delay);

                assert_eq!(packet.lost, packet.error_count > config.error_threshold);
                if packet.lost {
                    lost += 1;
                    assert_eq!(packet.throughput, 0.0);
                    assert!(packet.total_delay > base_delay);
                } else {
                    delivered += 1;
                    assert_eq!(packet.total_delay, base_delay);
                    assert_eq!(
                        packet.throughput,
                        config.packet_size_bits as f64 / packet.total_delay
                    );
                }
            }

            assert!(lost > 0, "{model:?}");
            assert!(delivered > 0, "{model:?}");
        }
    }

    #[test_log::test]
    fn test_zero_threshold_loses_any_error() {
        let config = reference()
            .with_error_threshold(0)
            .with_bit_error_probability(0.01);
        let link = LinkSimulator::new(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(4);

        for _ in 0..100 {
            let packet = link.transmit_packet(&mut rng);
            assert_eq!(packet.has_errors(), packet.throughput == 0.0);
        }
    }

    #[test_log::test]
    fn test_error_count_mean() {
        // n * p = 2 errors per packet
        let n = 2000;
        for model in [BitErrorModel::PerBit, BitErrorModel::Binomial] {
            let config = reference()
                .with_bit_error_probability(0.002)
                .with_error_model(model);
            let link = LinkSimulator::new(&config).unwrap();
            let mut rng = StdRng::seed_from_u64(5);

            let total: u64 = (0..n).map(|_| link.count_bit_errors(&mut rng)).sum();
            let mean = total as f64 / n as f64;

            assert!((mean - 2.0).abs() < 0.2, "{model:?} mean {mean}");
        }
    }

    #[test_log::test]
    fn test_same_seed_same_packets() {
        let config = SimulationConfig::default();
        let link = LinkSimulator::new(&config).unwrap();

        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            assert_eq!(link.transmit_packet(&mut a), link.transmit_packet(&mut b));
        }
    }

    #[test_log::test]
    fn test_rejects_free_retransmission() {
        let config = reference()
            .with_bit_error_probability(1.0)
            .with_retransmission_delay(0.0);

        assert!(matches!(
            LinkSimulator::new(&config),
            Err(Error::InvalidConfiguration(ConfigError::RetransmissionDelay(_)))
        ));
    }

    #[test_log::test]
    fn test_rejects_invalid_config() {
        let config = reference().with_bit_rate(0.0);

        assert!(matches!(
            LinkSimulator::new(&config),
            Err(Error::InvalidConfiguration(ConfigError::BitRate(_)))
        ));
    }
}
