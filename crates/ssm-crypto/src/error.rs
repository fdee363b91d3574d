use thiserror::Error;

pub type CipherResult<T> = Result<T, CipherError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    #[error("encryption not supported: {0:?}")]
    NotSupported(String),

    #[error("cipher initialisation failed: {0}")]
    Init(String),

    #[error("key preparation failed: {0}")]
    KeyPreparation(String),

    #[error("invalid key: expected {expected} bytes, got {actual}")]
    InvalidKey { expected: usize, actual: usize },

    #[error("encryption failed: {0}")]
    Encrypt(String),

    #[error("ciphertext too short: {len} bytes (minimum {min})")]
    TooShort { len: usize, min: usize },

    /// Authentication failure: wrong key or tampered data.
    #[error("decryption failed: invalid key or corrupted data")]
    Decrypt,
}
