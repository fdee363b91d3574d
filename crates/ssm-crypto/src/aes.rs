//! AES-256-GCM capability
//!
//! Key preparation: `SHA-256(passphrase)` (32 bytes, no salt).
//!
//! Ciphertext format (binary):
//! ```text
//! [12 bytes: random nonce][N bytes: ciphertext][16 bytes: GCM tag]
//! ```
//! No associated data is used; the envelope binds its two blobs through the
//! protected checksum instead.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

use crate::cipher::{Cipher, CipherType};
use crate::error::{CipherError, CipherResult};
use crate::key::PreparedKey;
use crate::{KEY_SIZE, NONCE_SIZE};

#[derive(Debug, Default, Clone, Copy)]
pub struct AesCipher;

impl AesCipher {
    pub fn new() -> Self {
        Self
    }

    fn build(key: &PreparedKey) -> CipherResult<Aes256Gcm> {
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| CipherError::InvalidKey {
            expected: KEY_SIZE,
            actual: key.len(),
        })
    }
}

impl Cipher for AesCipher {
    fn cipher_type(&self) -> CipherType {
        CipherType::Aes
    }

    fn prepare_key(&self, passphrase: &SecretString) -> CipherResult<PreparedKey> {
        let digest = Sha256::digest(passphrase.expose_secret().as_bytes());
        Ok(PreparedKey::from_bytes(digest.to_vec()))
    }

    fn encrypt(&self, plaintext: &[u8], key: &PreparedKey) -> CipherResult<Vec<u8>> {
        let cipher = Self::build(key)?;

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| CipherError::Encrypt(e.to_string()))?;

        let mut result = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        result.extend_from_slice(&nonce_bytes);
        result.extend_from_slice(&ciphertext);
        Ok(result)
    }

    fn decrypt(&self, ciphertext: &[u8], key: &PreparedKey) -> CipherResult<Vec<u8>> {
        let cipher = Self::build(key)?;

        if ciphertext.len() < NONCE_SIZE {
            return Err(CipherError::TooShort {
                len: ciphertext.len(),
                min: NONCE_SIZE,
            });
        }

        let (nonce_bytes, sealed) = ciphertext.split_at(NONCE_SIZE);
        let nonce = Nonce::from_slice(nonce_bytes);

        cipher
            .decrypt(nonce, sealed)
            .map_err(|_| CipherError::Decrypt)
    }
}
