//! ssm-crypto: cipher capabilities for the SSM envelope
//!
//! Every supported algorithm implements [`Cipher`] and is registered in a
//! [`CipherStore`] under its [`CipherType`] tag. The envelope layer only ever
//! talks to the store, so adding an algorithm means registering a new
//! capability:
//!
//! ```text
//! CipherStore
//!   ├── AES   → AesCipher   (SHA-256 key stretch, AES-256-GCM, random 96-bit nonce)
//!   └── MOCK  → MockCipher  (passthrough, test double)
//! ```
//!
//! Ciphertexts produced by [`AesCipher`] have the layout
//! `[12 bytes: nonce][N bytes: ciphertext][16 bytes: GCM tag]`.

pub mod aes;
pub mod checksum;
pub mod cipher;
pub mod error;
pub mod key;
pub mod mock;
pub mod store;

pub use aes::AesCipher;
pub use checksum::{checksum, Checksum};
pub use cipher::{Cipher, CipherType};
pub use error::{CipherError, CipherResult};
pub use key::PreparedKey;
pub use mock::{MockCipher, MockFailure};
pub use store::{CipherStore, CipherStoreBuilder};

/// Size of an AES-256 key in bytes
pub const KEY_SIZE: usize = 32;

/// Size of an AES-GCM nonce (96-bit)
pub const NONCE_SIZE: usize = 12;

/// Size of a GCM authentication tag
pub const TAG_SIZE: usize = 16;

/// Size of a SHA-256 checksum
pub const CHECKSUM_SIZE: usize = 32;
