/// 1Mbps link
pub static BIT_RATE: f64 = 1e6;

/// Packet size, in bits
pub static PACKET_SIZE_BITS: u64 = 1000;

/// Fixed propagation delay, in seconds
pub static PROPAGATION_DELAY: f64 = 0.001;

/// Number of packets in one run
pub static NUM_PACKETS: usize = 1000;

/// Probability of a single bit being flipped
pub static BIT_ERROR_PROBABILITY: f64 = 0.002;

/// Max errors per packet before it is considered lost
pub static ERROR_THRESHOLD: u64 = 5;

/// Delay penalty for a lost packet, in seconds
pub static RETRANSMISSION_DELAY: f64 = 0.002;

/// Bit error probabilities visited by a parameter sweep
pub static SWEEP_ERROR_PROBABILITIES: [f64; 9] =
    [0.0, 1e-4, 5e-4, 1e-3, 2e-3, 3e-3, 5e-3, 7.5e-3, 1e-2];

/// Sparkline columns per chart
pub static CHART_WIDTH: usize = 60;
