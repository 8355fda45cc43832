//! # Domain Entities
//!
//! Wire-format constants and the value types that flow through the
//! provisioning pipeline.
//!
//! ## Record Layout
//!
//! ```text
//! type(1) | version(1) | nameLen(1) | name(nameLen) | address(20) |
//! chainId(8) | keyId(1) | algorithmId(1) | sigLen(1) | signature(sigLen)
//! ```
//!
//! Everything up to and including `algorithmId` is the unsigned payload.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

// =============================================================================
// WIRE FORMAT CONSTANTS
// =============================================================================

/// Size of the record type field.
pub const TYPE_SIZE: usize = 1;
/// Size of the record version field.
pub const VERSION_SIZE: usize = 1;
/// Size of the collection name length prefix.
pub const NAME_LENGTH_SIZE: usize = 1;
/// Fixed header: type, version and name length.
pub const HEADER_SIZE: usize = TYPE_SIZE + VERSION_SIZE + NAME_LENGTH_SIZE;

/// Contract address width.
pub const ADDRESS_LENGTH: usize = 20;
/// Chain identifier width (big-endian `u64`).
pub const CHAIN_ID_SIZE: usize = 8;
/// Key identifier width.
pub const KEY_ID_SIZE: usize = 1;
/// Algorithm identifier width.
pub const ALGORITHM_ID_SIZE: usize = 1;
/// Signature length prefix width.
pub const SIGNATURE_LENGTH_SIZE: usize = 1;

/// Smallest DER-encoded secp256k1 signature accepted.
pub const MIN_DER_SIGNATURE_SIZE: usize = 67;
/// Largest DER-encoded secp256k1 signature accepted.
pub const MAX_DER_SIGNATURE_SIZE: usize = 72;

/// Only supported record type.
pub const RECORD_TYPE_V1: u8 = 1;
/// Only supported record version.
pub const RECORD_VERSION_V1: u8 = 1;

/// Capacity of a slot's collection name buffer, terminator included.
pub const COLLECTION_NAME_CAPACITY: usize = 70;
/// Number of metadata slots in a session.
pub const MAX_ITEMS: usize = 2;

/// Contract address of the collection.
pub type ContractAddress = [u8; ADDRESS_LENGTH];

/// Output of the record digest (SHA-256).
pub type Digest = [u8; 32];

// =============================================================================
// STATUS WORDS
// =============================================================================

/// Status returned to the command dispatcher.
///
/// The caller only learns accept or reject; every failure maps to
/// [`StatusWord::INVALID_DATA`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusWord(pub u16);

impl StatusWord {
    /// Record committed.
    pub const OK: StatusWord = StatusWord(0x9000);
    /// Record malformed or not authentic.
    pub const INVALID_DATA: StatusWord = StatusWord(0x6A80);

    /// Whether this is the success status.
    pub fn is_ok(self) -> bool {
        self == Self::OK
    }
}

impl From<StatusWord> for u16 {
    fn from(sw: StatusWord) -> u16 {
        sw.0
    }
}

impl fmt::Display for StatusWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

// =============================================================================
// COLLECTION NAME
// =============================================================================

/// Collection name stored in a fixed buffer with a trailing NUL.
///
/// The bytes are copied verbatim from the record; no UTF-8 validation is
/// performed, display code uses [`CollectionName::to_string_lossy`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CollectionName {
    bytes: [u8; COLLECTION_NAME_CAPACITY],
    len: usize,
}

impl CollectionName {
    /// Longest name that fits together with its terminator.
    pub const MAX_LEN: usize = COLLECTION_NAME_CAPACITY - 1;

    /// An empty name (terminator only).
    pub const fn empty() -> Self {
        Self {
            bytes: [0u8; COLLECTION_NAME_CAPACITY],
            len: 0,
        }
    }

    /// Copy `name` into a new buffer and terminate it.
    ///
    /// Returns `None` without touching any byte if the name and its
    /// terminator do not fit.
    pub fn from_bytes(name: &[u8]) -> Option<Self> {
        if name.len() + 1 > COLLECTION_NAME_CAPACITY {
            return None;
        }

        let mut bytes = [0u8; COLLECTION_NAME_CAPACITY];
        bytes[..name.len()].copy_from_slice(name);
        bytes[name.len()] = 0;

        Some(Self {
            bytes,
            len: name.len(),
        })
    }

    /// Name bytes without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Name bytes including the trailing NUL.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.bytes[..=self.len]
    }

    /// Name length in bytes, terminator excluded.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the name is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Lossy UTF-8 view for display and logging.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }
}

impl Default for CollectionName {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CollectionName")
            .field(&self.to_string_lossy())
            .finish()
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// A structurally valid record that has not been authenticated yet.
///
/// Borrows the unsigned payload and the trailing signature section from the
/// caller's buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedRecord<'a> {
    /// Record type (always [`RECORD_TYPE_V1`] once decoded)
    pub record_type: u8,
    /// Record version (always [`RECORD_VERSION_V1`] once decoded)
    pub record_version: u8,
    /// Collection display name
    pub collection_name: CollectionName,
    /// Collection contract address
    pub contract_address: ContractAddress,
    /// Chain identifier. Parsed, never checked against the transaction.
    pub chain_id: u64,
    /// Identifier of the trusted key that signed the record
    pub key_id: u8,
    /// Identifier of the signature algorithm
    pub algorithm_id: u8,
    /// Bytes covered by the signature (header through algorithm id)
    pub unsigned_payload: &'a [u8],
    /// Signature length byte, signature, and anything after it
    pub signature_section: &'a [u8],
}

/// How a record passed the authenticity stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Authenticity {
    /// Signature checked against the trusted key.
    Verified,
    /// Signature did not verify and enforcement was disabled.
    Bypassed,
}

/// A record that cleared the authenticity stage.
///
/// Only the verifier constructs this type, so the slot store cannot be fed
/// an unauthenticated record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerifiedRecord {
    collection_name: CollectionName,
    contract_address: ContractAddress,
    chain_id: u64,
    key_id: u8,
    authenticity: Authenticity,
}

impl VerifiedRecord {
    pub(crate) fn new(record: &DecodedRecord<'_>, authenticity: Authenticity) -> Self {
        Self {
            collection_name: record.collection_name,
            contract_address: record.contract_address,
            chain_id: record.chain_id,
            key_id: record.key_id,
            authenticity,
        }
    }

    /// Collection display name.
    pub fn collection_name(&self) -> &CollectionName {
        &self.collection_name
    }

    /// Collection contract address.
    pub fn contract_address(&self) -> &ContractAddress {
        &self.contract_address
    }

    /// Chain identifier carried by the record.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Key that signed the record.
    pub fn key_id(&self) -> u8 {
        self.key_id
    }

    /// Whether the signature was checked or bypassed.
    pub fn authenticity(&self) -> Authenticity {
        self.authenticity
    }
}

// =============================================================================
// SESSION TYPES
// =============================================================================

/// One entry of the rotating metadata store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MetadataSlot {
    /// Collection display name
    pub collection_name: CollectionName,
    /// Collection contract address
    pub contract_address: ContractAddress,
}

/// How the next transaction should be routed to plugins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PluginType {
    /// No routing decision made yet.
    #[default]
    Unresolved,
    /// Legacy internal plugin.
    OldInternal,
    /// Anything but a legacy internal plugin.
    NotOldInternal,
}
