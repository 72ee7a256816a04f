use thiserror::Error;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the simulator.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration rejected before any packet was simulated.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    /// Progress bar template could not be parsed.
    #[error("progress style: {0}")]
    ProgressStyle(#[from] indicatif::style::TemplateError),
    /// Chart could not be drawn or written.
    #[error("plot: {0}")]
    Plot(String),
}

/// A single out-of-contract configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// Bit rate is zero, negative or not finite.
    #[error("bit rate must be positive and finite, got {0}")]
    BitRate(f64),
    /// Packet carries no bits.
    #[error("packet size must be at least one bit")]
    PacketSize,
    /// Probability outside of [0, 1], or NaN.
    #[error("bit error probability must lie in [0, 1], got {0}")]
    BitErrorProbability(f64),
    /// Propagation delay is zero, negative or not finite.
    #[error("propagation delay must be positive and finite, got {0}")]
    PropagationDelay(f64),
    /// Retransmission penalty is zero, negative or not finite.
    #[error("retransmission delay must be positive and finite, got {0}")]
    RetransmissionDelay(f64),
}
