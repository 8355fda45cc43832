//! # Trust Registry
//!
//! Maps key identifiers to the public keys that are allowed to sign NFT
//! metadata records. The registry is fixed once built; lookups only ever
//! fail on an unknown identifier.
//!
//! ## Keys
//!
//! | Id | Key | Present |
//! |----|-----|---------|
//! | 0 | test key (secp256k1 generator, secret scalar 1) | only when enabled by configuration |
//! | 1 | Ledger NFT metadata key (`04f5700c…`) | always |
//!
//! The Ledger Ethereum app ships the `04f5700c…` key only in its NFT testing
//! build, where it answers to both id 0 and id 1. Here it is the key behind
//! id 1 in every build, and id 0 is a dedicated key whose secret is public,
//! so test fixtures can be signed without the Ledger signer.
//!
//! The registry holds at most [`MAX_TRUSTED_KEYS`] keys in a fixed array.

use crate::config::ProvisioningConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Identifier of the test-only key.
pub const TEST_KEY_ID: u8 = 0;
/// Identifier of the production NFT metadata key.
pub const NFT_METADATA_KEY_ID: u8 = 1;

/// Size of an uncompressed SEC1 secp256k1 public key.
pub const SECP256K1_UNCOMPRESSED_KEY_SIZE: usize = 65;

/// Maximum number of keys a registry can hold.
pub const MAX_TRUSTED_KEYS: usize = 2;

/// Ledger NFT metadata public key (uncompressed SEC1), as embedded in the
/// Ledger Ethereum app's NFT information provisioning handler.
pub const NFT_METADATA_PUBLIC_KEY: [u8; SECP256K1_UNCOMPRESSED_KEY_SIZE] = [
    0x04, 0xf5, 0x70, 0x0c, 0xa1, 0xe8, 0x74, 0x24, 0xc7, 0xc7, 0xd1, 0x19, 0xe7, 0xe3, 0xc1, 0x89,
    0xb1, 0x62, 0x50, 0x94, 0xdb, 0x6e, 0xa0, 0x40, 0x87, 0xc8, 0x30, 0x00, 0x7d, 0x0b, 0x46, 0x9a,
    0x53, 0x11, 0xee, 0x6a, 0x1a, 0xcd, 0x1d, 0xa5, 0xaa, 0xb0, 0xf5, 0xc6, 0xdf, 0x13, 0x15, 0x8d,
    0x28, 0xcc, 0x12, 0xd1, 0xdd, 0xa6, 0xec, 0xe9, 0x46, 0xb8, 0x9d, 0x5c, 0x05, 0x49, 0x92, 0x59,
    0xc4,
];

/// Test public key: the secp256k1 generator point, whose secret scalar is 1.
pub const TEST_PUBLIC_KEY: [u8; SECP256K1_UNCOMPRESSED_KEY_SIZE] = [
    0x04, 0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac, 0x55, 0xa0, 0x62, 0x95, 0xce, 0x87, 0x0b,
    0x07, 0x02, 0x9b, 0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9, 0x59, 0xf2, 0x81, 0x5b, 0x16, 0xf8, 0x17,
    0x98, 0x48, 0x3a, 0xda, 0x77, 0x26, 0xa3, 0xc4, 0x65, 0x5d, 0xa4, 0xfb, 0xfc, 0x0e, 0x11, 0x08,
    0xa8, 0xfd, 0x17, 0xb4, 0x48, 0xa6, 0x85, 0x54, 0x19, 0x9c, 0x47, 0xd0, 0x8f, 0xfb, 0x10, 0xd4,
    0xb8,
];

/// Elliptic curve a trusted key lives on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Curve {
    /// secp256k1
    Secp256k1,
}

/// A public key trusted to sign metadata records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrustedKey {
    /// Identifier carried in the record
    pub key_id: u8,
    /// Curve of the key
    pub curve: Curve,
    /// Uncompressed SEC1 encoding (0x04 || x || y)
    pub public_key: [u8; SECP256K1_UNCOMPRESSED_KEY_SIZE],
}

impl TrustedKey {
    /// A secp256k1 key from its uncompressed SEC1 encoding.
    pub const fn secp256k1(key_id: u8, public_key: [u8; SECP256K1_UNCOMPRESSED_KEY_SIZE]) -> Self {
        Self {
            key_id,
            curve: Curve::Secp256k1,
            public_key,
        }
    }
}

/// Immutable key id → trusted key mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrustRegistry {
    keys: [Option<TrustedKey>; MAX_TRUSTED_KEYS],
}

impl TrustRegistry {
    /// Registry for the given configuration.
    ///
    /// The production key is always present; the test key only when
    /// `enable_test_key` is set.
    pub fn new(config: &ProvisioningConfig) -> Self {
        let test_key = config
            .enable_test_key
            .then(|| TrustedKey::secp256k1(TEST_KEY_ID, TEST_PUBLIC_KEY));

        Self {
            keys: [
                Some(TrustedKey::secp256k1(
                    NFT_METADATA_KEY_ID,
                    NFT_METADATA_PUBLIC_KEY,
                )),
                test_key,
            ],
        }
    }

    /// Production registry: the NFT metadata key only.
    pub fn production() -> Self {
        Self::new(&ProvisioningConfig::default())
    }

    /// Registry holding `keys`.
    ///
    /// Later entries never shadow earlier ones with the same id. Keys past
    /// [`MAX_TRUSTED_KEYS`] are dropped.
    pub fn from_keys(keys: impl IntoIterator<Item = TrustedKey>) -> Self {
        let mut registry = Self {
            keys: [None; MAX_TRUSTED_KEYS],
        };

        for key in keys {
            if registry.contains(key.key_id) {
                continue;
            }
            match registry.keys.iter_mut().find(|slot| slot.is_none()) {
                Some(slot) => *slot = Some(key),
                None => warn!(key_id = key.key_id, "trust registry full, key dropped"),
            }
        }

        registry
    }

    /// Look up a key by identifier.
    pub fn resolve(&self, key_id: u8) -> Option<&TrustedKey> {
        self.iter().find(|k| k.key_id == key_id)
    }

    /// Whether `key_id` is trusted.
    pub fn contains(&self, key_id: u8) -> bool {
        self.resolve(key_id).is_some()
    }

    /// Trusted keys, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TrustedKey> {
        self.keys.iter().flatten()
    }

    /// Whether the test key is trusted, under its own id or any other.
    pub fn trusts_test_key(&self) -> bool {
        self.iter()
            .any(|k| k.key_id == TEST_KEY_ID || k.public_key == TEST_PUBLIC_KEY)
    }

    /// Number of trusted keys.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TrustRegistry {
    fn default() -> Self {
        Self::production()
    }
}
