//! SHA-256 checksums binding the protected record to the private ciphertext

use sha2::{Digest, Sha256};

use crate::CHECKSUM_SIZE;

pub type Checksum = [u8; CHECKSUM_SIZE];

/// SHA-256 of `data`.
pub fn checksum(data: &[u8]) -> Checksum {
    let digest = Sha256::digest(data);
    let mut out = [0u8; CHECKSUM_SIZE];
    out.copy_from_slice(&digest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_vector() {
        // SHA-256("abc")
        let expected = [
            0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae,
            0x22, 0x23, 0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61,
            0xf2, 0x00, 0x15, 0xad,
        ];
        assert_eq!(checksum(b"abc"), expected);
    }

    #[test]
    fn test_different_content_different_checksum() {
        assert_ne!(checksum(b"foo"), checksum(b"bar"));
    }

    proptest! {
        #[test]
        fn checksum_is_deterministic(data in proptest::collection::vec(any::<u8>(), 0..=2048)) {
            prop_assert_eq!(checksum(&data), checksum(&data));
        }
    }
}
