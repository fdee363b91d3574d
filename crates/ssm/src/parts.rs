use serde::{Deserialize, Serialize};
use ssm_crypto::{Checksum, CipherType};

use crate::encoding::base64_bytes;

/// Free-form metadata attached to either side of an envelope.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Metadata that travels unencrypted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Public {
    pub version: String,
    /// Wire tag of the cipher, e.g. `"AES"`
    pub encryption: String,
    pub metadata: Option<Metadata>,
}

impl Public {
    /// The cipher named by `encryption`, if supported.
    pub fn cipher_type(&self) -> Option<CipherType> {
        self.encryption.parse().ok()
    }
}

/// Metadata sealed alongside the private fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Protected {
    /// SHA-256 of the private ciphertext. All zeros until the Fact has been
    /// recovered from a Secret.
    pub checksum: Checksum,
    /// Joins private fragments before encryption. Must not occur inside a
    /// fragment, or the fragment is split in two when told.
    #[serde(with = "base64_bytes")]
    pub separator: Vec<u8>,
    pub metadata: Option<Metadata>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_protected_wire_shape() {
        let protected = Protected {
            checksum: [7u8; 32],
            separator: b"%%--%%".to_vec(),
            metadata: None,
        };
        let value = serde_json::to_value(&protected).unwrap();

        assert_eq!(value["checksum"], serde_json::to_value([7u8; 32]).unwrap());
        assert_eq!(value["separator"], json!("JSUtLSUl"));
        assert_eq!(value["metadata"], serde_json::Value::Null);
    }

    #[test]
    fn test_protected_null_separator_reads_as_empty() {
        let protected: Protected = serde_json::from_str(r#"{"separator":null}"#).unwrap();
        assert!(protected.separator.is_empty());
        assert_eq!(protected.checksum, [0u8; 32]);
    }

    #[test]
    fn test_public_cipher_type() {
        let mut public = Public {
            version: crate::VERSION.into(),
            encryption: "AES".into(),
            metadata: None,
        };
        assert_eq!(public.cipher_type(), Some(CipherType::Aes));

        public.encryption = "ROT13".into();
        assert_eq!(public.cipher_type(), None);
    }
}
