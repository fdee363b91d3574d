use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::encoding::base64_bytes;
use crate::envelope::Ssm;
use crate::fact::Fact;
use crate::parts::Public;
use crate::util::byte_size;
use ssm_core::SsmResult;

/// Encrypted side of an envelope. Produced by [`Ssm::hide`], never mutated
/// by [`Ssm::tell`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Secret {
    pub public: Public,
    /// Encrypted, separator-joined private fragments
    #[serde(with = "base64_bytes")]
    pub private: Vec<u8>,
    /// Encrypted JSON of the protected record
    #[serde(with = "base64_bytes")]
    pub protected: Vec<u8>,
}

impl Secret {
    /// Length of the private ciphertext in bytes.
    pub fn size(&self) -> usize {
        self.private.len()
    }

    /// Decrypt back into a [`Fact`]. See [`Ssm::tell`].
    pub fn tell(&self, ssm: &Ssm, key: &SecretString) -> SsmResult<Fact> {
        ssm.tell(self, key)
    }

    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl std::fmt::Display for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Secret<{}: {}>",
            self.public.encryption,
            byte_size(self.size())
        )
    }
}
