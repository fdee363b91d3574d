//! ssm: secure secret manifests
//!
//! A [`Fact`] is a plaintext bundle: ordered private fragments plus public
//! and protected metadata. Hiding it yields a [`Secret`]:
//!
//! ```text
//! Fact                                   Secret
//! ├── public ──────────────────────────▶ public     (as is)
//! ├── private: [f0, f1, ..] ─ join(sep) ─ encrypt ─▶ private
//! └── protected { checksum, sep, meta } ─ json ─ encrypt ─▶ protected
//!          ▲
//!          └── checksum = SHA-256(private ciphertext)
//! ```
//!
//! Telling a Secret reverses the process, refusing to open `private` unless
//! its ciphertext matches the checksum recovered from `protected`.
//!
//! All operations go through an [`Ssm`] context that owns the cipher store.
//!
//! ```
//! use secrecy::SecretString;
//! use ssm::Ssm;
//!
//! let ssm = Ssm::new().unwrap();
//! let key = SecretString::from("AwesomeKey");
//!
//! let mut fact = ssm.create("AES", None).unwrap();
//! fact.push("https://github.com/neoxelox/ssm");
//!
//! let secret = fact.hide(&ssm, &key).unwrap();
//! let told = ssm.parse(&secret.to_json().unwrap()).unwrap().tell(&ssm, &key).unwrap();
//! assert_eq!(told.private, fact.private);
//! ```

mod encoding;
pub mod envelope;
pub mod fact;
pub mod parts;
pub mod secret;
pub mod util;

pub use envelope::Ssm;
pub use fact::Fact;
pub use parts::{Metadata, Protected, Public};
pub use secret::Secret;

pub use ssm_core::{SsmError, SsmResult, DEFAULT_SEPARATOR};
pub use ssm_crypto::{CipherStore, CipherType};

/// Envelope format version stamped into every new Fact.
pub const VERSION: &str = "0.1.3";

/// Envelope versions that [`Ssm::parse`] always rejects.
pub const INCOMPATIBLE_VERSIONS: &[&str] = &[];
