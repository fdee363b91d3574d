//! Registry of cipher capabilities keyed by [`CipherType`]

use std::collections::BTreeMap;

use crate::aes::AesCipher;
use crate::cipher::{Cipher, CipherType};
use crate::error::CipherResult;
use crate::mock::MockCipher;

/// Read-only set of ciphers, built once and shared by reference.
///
/// Lookups are total over [`CipherType`]: a tag with no registered
/// capability resolves to a passthrough [`MockCipher`].
pub struct CipherStore {
    ciphers: BTreeMap<CipherType, Box<dyn Cipher>>,
    fallback: MockCipher,
}

impl CipherStore {
    /// Store with every built-in capability registered.
    pub fn new() -> CipherResult<Self> {
        Self::builder()
            .register(MockCipher::new())
            .register(AesCipher::new())
            .build()
    }

    pub fn builder() -> CipherStoreBuilder {
        CipherStoreBuilder::default()
    }

    pub fn get(&self, cipher_type: CipherType) -> &dyn Cipher {
        match self.ciphers.get(&cipher_type) {
            Some(cipher) => cipher.as_ref(),
            None => &self.fallback,
        }
    }

    /// Parse a wire tag and look it up.
    pub fn resolve(&self, tag: &str) -> CipherResult<&dyn Cipher> {
        let cipher_type: CipherType = tag.parse()?;
        Ok(self.get(cipher_type))
    }

    /// Tags with an explicitly registered capability.
    pub fn registered(&self) -> impl Iterator<Item = CipherType> + '_ {
        self.ciphers.keys().copied()
    }
}

impl std::fmt::Debug for CipherStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherStore")
            .field("registered", &self.ciphers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Collects capabilities, then initialises all of them in [`build`](Self::build).
#[derive(Default)]
pub struct CipherStoreBuilder {
    ciphers: Vec<Box<dyn Cipher>>,
}

impl CipherStoreBuilder {
    /// Add a capability. A later registration for the same tag replaces an
    /// earlier one.
    pub fn register<C: Cipher + 'static>(mut self, cipher: C) -> Self {
        self.ciphers.push(Box::new(cipher));
        self
    }

    /// Initialise every registered capability. Any failure aborts the build.
    pub fn build(self) -> CipherResult<CipherStore> {
        let mut ciphers = BTreeMap::new();
        for mut cipher in self.ciphers {
            cipher.init()?;
            ciphers.insert(cipher.cipher_type(), cipher);
        }

        tracing::debug!(
            registered = ?ciphers.keys().collect::<Vec<_>>(),
            "cipher store ready"
        );

        Ok(CipherStore {
            ciphers,
            fallback: MockCipher::new(),
        })
    }
}
