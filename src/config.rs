use crate::{
    common::*,
    error::{ConfigError, Result},
};

/// How the bit errors of a packet are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum BitErrorModel {
    /// One uniform draw per bit, compared against the error probability.
    #[default]
    PerBit,
    /// A single Binomial(packet size, probability) sample per packet.
    Binomial,
}

/// Immutable parameters of a simulated point-to-point link.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Link bit rate, in bits per second
    pub bit_rate: f64,
    /// Packet size, in bits
    pub packet_size_bits: u64,
    /// Propagation delay, in seconds
    pub propagation_delay: f64,
    /// Number of packets transmitted by a run
    pub num_packets: usize,
    /// Probability of a single bit error
    pub bit_error_probability: f64,
    /// Largest error count a packet survives
    pub error_threshold: u64,
    /// Penalty added to the delay of a lost packet, in seconds
    pub retransmission_delay: f64,
    /// Bit error sampling strategy
    pub error_model: BitErrorModel,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            bit_rate: BIT_RATE,
            packet_size_bits: PACKET_SIZE_BITS,
            propagation_delay: PROPAGATION_DELAY,
            num_packets: NUM_PACKETS,
            bit_error_probability: BIT_ERROR_PROBABILITY,
            error_threshold: ERROR_THRESHOLD,
            retransmission_delay: RETRANSMISSION_DELAY,
            error_model: BitErrorModel::default(),
        }
    }
}

impl SimulationConfig {
    /// Sets the link bit rate.
    pub fn with_bit_rate(mut self, bit_rate: f64) -> Self {
        self.bit_rate = bit_rate;
        self
    }

    /// Sets the packet size.
    pub fn with_packet_size_bits(mut self, packet_size_bits: u64) -> Self {
        self.packet_size_bits = packet_size_bits;
        self
    }

    /// Sets the propagation delay.
    pub fn with_propagation_delay(mut self, propagation_delay: f64) -> Self {
        self.propagation_delay = propagation_delay;
        self
    }

    /// Sets the number of packets per run.
    pub fn with_num_packets(mut self, num_packets: usize) -> Self {
        self.num_packets = num_packets;
        self
    }

    /// Sets the bit error probability.
    pub fn with_bit_error_probability(mut self, p: f64) -> Self {
        self.bit_error_probability = p;
        self
    }

    /// Sets the error threshold.
    pub fn with_error_threshold(mut self, error_threshold: u64) -> Self {
        self.error_threshold = error_threshold;
        self
    }

    /// Sets the retransmission penalty.
    pub fn with_retransmission_delay(mut self, retransmission_delay: f64) -> Self {
        self.retransmission_delay = retransmission_delay;
        self
    }

    /// Sets the bit error model.
    pub fn with_error_model(mut self, error_model: BitErrorModel) -> Self {
        self.error_model = error_model;
        self
    }

    /// Time to put one packet on the wire.
    pub fn transmission_delay(&self) -> f64 {
        self.packet_size_bits as f64 / self.bit_rate
    }

    /// Checks every value is inside the simulator's contract.
    pub fn validate(&self) -> Result<()> {
        if !(self.bit_rate.is_finite() && self.bit_rate > 0.0) {
            return Err(ConfigError::BitRate(self.bit_rate).into());
        }
        if self.packet_size_bits == 0 {
            return Err(ConfigError::PacketSize.into());
        }
        if !(0.0..=1.0).contains(&self.bit_error_probability) {
            return Err(ConfigError::BitErrorProbability(self.bit_error_probability).into());
        }
        if !(self.propagation_delay.is_finite() && self.propagation_delay > 0.0) {
            return Err(ConfigError::PropagationDelay(self.propagation_delay).into());
        }
        if !(self.retransmission_delay.is_finite() && self.retransmission_delay > 0.0) {
            return Err(ConfigError::RetransmissionDelay(self.retransmission_delay).into());
        }

        Ok(())
    }
}
