//! Reviewer Core - Configuration, errors, and ports
//!
//! This crate contains the configuration, error taxonomy, and the generation
//! port shared by the Reviewer adapters and binaries.

pub mod config;
pub mod error;
pub mod instruction;
pub mod ports;

pub use config::{ApiKey, ConfigSource, ForwarderConfig, LayeredConfig};
pub use error::{Result, ReviewerError};
pub use instruction::{DEFAULT_MODEL, SYSTEM_INSTRUCTION};
pub use ports::Generator;
