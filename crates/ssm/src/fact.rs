use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::encoding::base64_fragments;
use crate::envelope::Ssm;
use crate::parts::{Metadata, Protected, Public};
use crate::secret::Secret;
use ssm_core::SsmResult;

/// Plaintext side of an envelope.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    pub public: Public,
    /// Ordered secret fragments
    #[serde(with = "base64_fragments")]
    pub private: Vec<Vec<u8>>,
    pub protected: Protected,
}

impl Fact {
    /// Number of private fragments.
    pub fn size(&self) -> usize {
        self.private.len()
    }

    /// Append a private fragment.
    pub fn push(&mut self, fragment: impl Into<Vec<u8>>) {
        self.private.push(fragment.into());
    }

    pub fn public_metadata_mut(&mut self) -> &mut Metadata {
        self.public.metadata.get_or_insert_with(Metadata::new)
    }

    pub fn protected_metadata_mut(&mut self) -> &mut Metadata {
        self.protected.metadata.get_or_insert_with(Metadata::new)
    }

    /// Encrypt into a [`Secret`] and stamp the checksum. See [`Ssm::hide`].
    pub fn hide(&mut self, ssm: &Ssm, key: &SecretString) -> SsmResult<Secret> {
        ssm.hide(self, key)
    }
}

impl std::fmt::Display for Fact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fact<{}: [{}]>", self.public.encryption, self.size())
    }
}

impl std::fmt::Debug for Fact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fact")
            .field("public", &self.public)
            .field("private", &format_args!("[{} fragments REDACTED]", self.size()))
            .field("protected", &self.protected)
            .finish()
    }
}
