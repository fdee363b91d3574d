//! Passthrough test double
//!
//! [`MockCipher`] does no cryptography: the prepared key is the passphrase's
//! bytes and "ciphertext" is the plaintext. It is the store's fallback for
//! tags without a registered capability, and it can be told to fail at a
//! chosen call so the envelope's error paths can be exercised.

use std::sync::atomic::{AtomicUsize, Ordering};

use secrecy::{ExposeSecret, SecretString};

use crate::cipher::{Cipher, CipherType};
use crate::error::{CipherError, CipherResult};
use crate::key::PreparedKey;

/// Where a [`MockCipher`] should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    Init,
    PrepareKey,
    /// Succeed `after` encrypt calls, then fail every following one.
    Encrypt { after: usize },
    /// Succeed `after` decrypt calls, then fail every following one.
    Decrypt { after: usize },
}

#[derive(Debug, Default)]
pub struct MockCipher {
    failure: Option<MockFailure>,
    encrypt_calls: AtomicUsize,
    decrypt_calls: AtomicUsize,
}

impl MockCipher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(failure: MockFailure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    pub fn encrypt_calls(&self) -> usize {
        self.encrypt_calls.load(Ordering::SeqCst)
    }

    pub fn decrypt_calls(&self) -> usize {
        self.decrypt_calls.load(Ordering::SeqCst)
    }
}

impl Cipher for MockCipher {
    fn init(&mut self) -> CipherResult<()> {
        match self.failure {
            Some(MockFailure::Init) => Err(CipherError::Init("mock init failure".into())),
            _ => Ok(()),
        }
    }

    fn cipher_type(&self) -> CipherType {
        CipherType::Mock
    }

    fn prepare_key(&self, passphrase: &SecretString) -> CipherResult<PreparedKey> {
        if self.failure == Some(MockFailure::PrepareKey) {
            return Err(CipherError::KeyPreparation("mock key failure".into()));
        }
        Ok(PreparedKey::from_bytes(
            passphrase.expose_secret().as_bytes().to_vec(),
        ))
    }

    fn encrypt(&self, plaintext: &[u8], _key: &PreparedKey) -> CipherResult<Vec<u8>> {
        let seen = self.encrypt_calls.fetch_add(1, Ordering::SeqCst);
        match self.failure {
            Some(MockFailure::Encrypt { after }) if seen >= after => {
                Err(CipherError::Encrypt("mock encrypt failure".into()))
            }
            _ => Ok(plaintext.to_vec()),
        }
    }

    fn decrypt(&self, ciphertext: &[u8], _key: &PreparedKey) -> CipherResult<Vec<u8>> {
        let seen = self.decrypt_calls.fetch_add(1, Ordering::SeqCst);
        match self.failure {
            Some(MockFailure::Decrypt { after }) if seen >= after => Err(CipherError::Decrypt),
            _ => Ok(ciphertext.to_vec()),
        }
    }
}
