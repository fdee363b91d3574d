//! The cipher capability and its type tags

use secrecy::SecretString;

use crate::error::{CipherError, CipherResult};
use crate::key::PreparedKey;

/// Identifies which [`Cipher`] seals an envelope.
///
/// The string form is what travels on the wire in `public.encryption`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CipherType {
    Mock,
    Aes,
}

impl CipherType {
    /// Every supported tag.
    pub const ALL: [CipherType; 2] = [CipherType::Mock, CipherType::Aes];

    pub fn as_str(&self) -> &'static str {
        match self {
            CipherType::Mock => "MOCK",
            CipherType::Aes => "AES",
        }
    }

    /// Whether `tag` names a supported cipher. Matching is exact.
    pub fn is_supported(tag: &str) -> bool {
        tag.parse::<CipherType>().is_ok()
    }
}

impl std::str::FromStr for CipherType {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CipherType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CipherError::NotSupported(s.to_string()))
    }
}

impl std::fmt::Display for CipherType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for CipherType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// An authenticated encryption algorithm usable by the envelope.
///
/// Implementations must be stateless after [`init`](Cipher::init): the store
/// hands out shared references to any number of callers.
pub trait Cipher: Send + Sync {
    /// One-time setup, run by the store before the cipher is handed out.
    fn init(&mut self) -> CipherResult<()> {
        Ok(())
    }

    fn cipher_type(&self) -> CipherType;

    /// Deterministically stretch a passphrase into key material.
    fn prepare_key(&self, passphrase: &SecretString) -> CipherResult<PreparedKey>;

    /// Seal `plaintext`. Real ciphers embed a fresh nonce, so repeated calls
    /// return different bytes.
    fn encrypt(&self, plaintext: &[u8], key: &PreparedKey) -> CipherResult<Vec<u8>>;

    /// Open the output of [`encrypt`](Cipher::encrypt).
    fn decrypt(&self, ciphertext: &[u8], key: &PreparedKey) -> CipherResult<Vec<u8>>;
}
