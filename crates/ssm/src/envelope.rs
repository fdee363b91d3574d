//! Hide/Tell: the transformation between [`Fact`] and [`Secret`]
//!
//! Hide:
//!   1. key = prepare_key(passphrase)
//!   2. private = encrypt(join(fragments, separator))
//!   3. protected.checksum = SHA-256(private)
//!   4. protected = encrypt(json(protected))
//!
//! Tell runs the same steps backwards and refuses to open `private` when its
//! ciphertext does not match the checksum sealed inside `protected`.
//!
//! Every failure is mapped onto an opaque [`SsmError`] so callers cannot tell
//! which stage rejected the input.

use secrecy::SecretString;
use zeroize::Zeroizing;

use ssm_core::{EnvelopeConfig, SsmError, SsmResult, DEFAULT_SEPARATOR};
use ssm_crypto::{checksum, Cipher, CipherResult, CipherStore, CipherType};

use crate::fact::Fact;
use crate::parts::{Protected, Public};
use crate::secret::Secret;
use crate::{INCOMPATIBLE_VERSIONS, VERSION};

/// Shared envelope context: the cipher store plus creation and parsing
/// policy. Immutable once built, so one instance can serve many threads.
#[derive(Debug)]
pub struct Ssm {
    ciphers: CipherStore,
    separator: Vec<u8>,
    incompatible_versions: Vec<String>,
}

impl Ssm {
    /// Context with every built-in cipher and default policy.
    pub fn new() -> CipherResult<Self> {
        Ok(Self::with_store(CipherStore::new()?))
    }

    pub fn with_store(ciphers: CipherStore) -> Self {
        Self {
            ciphers,
            separator: DEFAULT_SEPARATOR.as_bytes().to_vec(),
            incompatible_versions: INCOMPATIBLE_VERSIONS
                .iter()
                .map(|v| v.to_string())
                .collect(),
        }
    }

    pub fn from_config(config: &EnvelopeConfig) -> CipherResult<Self> {
        let mut ssm = Self::new()?.with_separator(config.separator.as_str());
        for version in &config.incompatible_versions {
            ssm = ssm.deny_version(version.as_str());
        }
        tracing::debug!(
            separator_len = ssm.separator.len(),
            incompatible_versions = ?ssm.incompatible_versions,
            "envelope context configured"
        );
        Ok(ssm)
    }

    /// Separator used by [`create`](Self::create) when none is given.
    pub fn with_separator(mut self, separator: impl Into<Vec<u8>>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Reject envelopes stamped with `version` in [`parse`](Self::parse).
    pub fn deny_version(mut self, version: impl Into<String>) -> Self {
        let version = version.into();
        if !self.incompatible_versions.contains(&version) {
            self.incompatible_versions.push(version);
        }
        self
    }

    pub fn ciphers(&self) -> &CipherStore {
        &self.ciphers
    }

    pub fn is_compatible(&self, version: &str) -> bool {
        !self.incompatible_versions.iter().any(|v| v == version)
    }

    /// Start an empty [`Fact`] sealed by `encryption`.
    ///
    /// Uses the context's default separator (`"%%--%%"` unless configured)
    /// when `separator` is `None`.
    pub fn create(&self, encryption: impl AsRef<str>, separator: Option<&str>) -> SsmResult<Fact> {
        let encryption = encryption.as_ref();
        if !CipherType::is_supported(encryption) {
            return Err(SsmError::EncryptionNotSupported);
        }

        let separator = match separator {
            Some(s) => s.as_bytes().to_vec(),
            None => self.separator.clone(),
        };

        Ok(Fact {
            public: Public {
                version: VERSION.to_string(),
                encryption: encryption.to_string(),
                metadata: None,
            },
            private: Vec::new(),
            protected: Protected {
                separator,
                ..Protected::default()
            },
        })
    }

    /// Decode untrusted bytes into a [`Secret`] without any cryptography.
    ///
    /// Rejects malformed JSON, incompatible versions, unsupported ciphers and
    /// envelopes without a protected part.
    pub fn parse(&self, data: &[u8]) -> SsmResult<Secret> {
        let secret: Secret = serde_json::from_slice(data).map_err(|_| SsmError::NotASecret)?;

        if !self.is_compatible(&secret.public.version)
            || !CipherType::is_supported(&secret.public.encryption)
            || secret.protected.is_empty()
        {
            return Err(SsmError::NotASecret);
        }

        Ok(secret)
    }

    /// Encrypt `fact` under `key`, stamping the private checksum into
    /// `fact.protected`.
    ///
    /// The stamp is written only once both blobs are sealed; a failed hide
    /// leaves the Fact as it was.
    pub fn hide(&self, fact: &mut Fact, key: &SecretString) -> SsmResult<Secret> {
        let cipher = self.cipher_for(&fact.public.encryption)?;

        let key = cipher
            .prepare_key(key)
            .map_err(|_| SsmError::EncryptionFailed)?;

        let joined = Zeroizing::new(fact.private.join(fact.protected.separator.as_slice()));
        let private = cipher
            .encrypt(&joined, &key)
            .map_err(|_| SsmError::EncryptionFailed)?;

        let stamped = Protected {
            checksum: checksum(&private),
            ..fact.protected.clone()
        };
        let serialized = Zeroizing::new(
            serde_json::to_vec(&stamped).map_err(|_| SsmError::EncryptionFailed)?,
        );
        let protected = cipher
            .encrypt(&serialized, &key)
            .map_err(|_| SsmError::EncryptionFailed)?;

        fact.protected.checksum = stamped.checksum;

        tracing::trace!(
            encryption = %fact.public.encryption,
            fragments = fact.size(),
            private_len = private.len(),
            "fact hidden"
        );

        Ok(Secret {
            public: fact.public.clone(),
            private,
            protected,
        })
    }

    /// Decrypt `secret` with `key`.
    ///
    /// The private blob is only opened after its ciphertext has matched the
    /// checksum recovered from the protected blob.
    pub fn tell(&self, secret: &Secret, key: &SecretString) -> SsmResult<Fact> {
        let cipher = self.cipher_for(&secret.public.encryption)?;

        let key = cipher
            .prepare_key(key)
            .map_err(|_| SsmError::DecryptionFailed)?;

        let serialized = Zeroizing::new(
            cipher
                .decrypt(&secret.protected, &key)
                .map_err(|_| SsmError::DecryptionFailed)?,
        );
        let protected: Protected =
            serde_json::from_slice(&serialized).map_err(|_| SsmError::DecryptionFailed)?;

        if checksum(&secret.private) != protected.checksum {
            return Err(SsmError::ChecksumMismatch);
        }

        let joined = Zeroizing::new(
            cipher
                .decrypt(&secret.private, &key)
                .map_err(|_| SsmError::DecryptionFailed)?,
        );
        let private = split(&joined, &protected.separator);

        tracing::trace!(
            encryption = %secret.public.encryption,
            fragments = private.len(),
            "secret told"
        );

        Ok(Fact {
            public: secret.public.clone(),
            private,
            protected,
        })
    }

    fn cipher_for(&self, encryption: &str) -> SsmResult<&dyn Cipher> {
        self.ciphers
            .resolve(encryption)
            .map_err(|_| SsmError::EncryptionNotSupported)
    }
}

/// Split `data` on every non-overlapping occurrence of `separator`, left to
/// right. No escaping: a separator inside a fragment yields an extra one.
///
/// Empty input yields a single empty fragment. An empty separator splits
/// after every UTF-8 sequence (each invalid byte stands alone), and yields no
/// fragments for empty input.
fn split(data: &[u8], separator: &[u8]) -> Vec<Vec<u8>> {
    if separator.is_empty() {
        return explode(data);
    }

    let mut fragments = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i + separator.len() <= data.len() {
        if data[i..].starts_with(separator) {
            fragments.push(data[start..i].to_vec());
            i += separator.len();
            start = i;
        } else {
            i += 1;
        }
    }
    fragments.push(data[start..].to_vec());
    fragments
}

fn explode(data: &[u8]) -> Vec<Vec<u8>> {
    let mut fragments = Vec::new();
    for chunk in data.utf8_chunks() {
        let mut buf = [0u8; 4];
        for c in chunk.valid().chars() {
            fragments.push(c.encode_utf8(&mut buf).as_bytes().to_vec());
        }
        fragments.extend(chunk.invalid().iter().map(|b| vec![*b]));
    }
    fragments
}
