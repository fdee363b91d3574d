//! Prepared key material

use zeroize::Zeroize;

/// Key bytes produced by [`Cipher::prepare_key`](crate::Cipher::prepare_key).
///
/// Zeroized on drop.
#[derive(Clone)]
pub struct PreparedKey {
    bytes: Vec<u8>,
}

impl PreparedKey {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Drop for PreparedKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for PreparedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
