//! Point-to-point Link Delay and Throughput Simulation

#![forbid(unsafe_code, unused_must_use)]
#![warn(clippy::all, missing_docs)]

/// Reference link constants.
pub mod common;

/// Link configuration.
pub mod config;

/// Error types.
pub mod error;

/// Single packet transmission.
pub mod link;

/// Packet loop over a whole run.
pub mod driver;

/// Summary statistics and terminal charts.
pub mod report;

/// SVG charts.
pub mod plot;

/// Bit error probability sweep.
pub mod sweep;

pub use config::{BitErrorModel, SimulationConfig};
pub use driver::{SimulationRun, run};
pub use error::{ConfigError, Error, Result};
pub use link::{LinkSimulator, PacketResult};
