pub mod config;
pub mod error;

pub use config::{EnvelopeConfig, LogFormat, LoggingConfig, SsmConfig, DEFAULT_SEPARATOR};
pub use error::{ConfigError, SsmError, SsmResult};
