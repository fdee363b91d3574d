use std::path::PathBuf;

use thiserror::Error;

pub type SsmResult<T> = Result<T, SsmError>;

/// Failures of the envelope protocol.
///
/// Variants carry no detail: callers learn which protocol step
/// rejected the input, never which internal stage failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SsmError {
    #[error("encryption not supported")]
    EncryptionNotSupported,

    #[error("encryption failed")]
    EncryptionFailed,

    #[error("decryption failed")]
    DecryptionFailed,

    #[error("checksums do not match")]
    ChecksumMismatch,

    #[error("input is not a secret")]
    NotASecret,
}

/// Failures loading `ssm.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
