//! # Provisioning Errors
//!
//! Every variant is terminal for the current invocation and collapses to the
//! same [`StatusWord`] for the caller. The variants only differ in what gets
//! logged.

use super::entities::StatusWord;
use thiserror::Error;

/// The record does not have the expected shape.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum StructuralError {
    /// Declared length reaches past the end of the buffer
    #[error("Declared length {declared} exceeds buffer of {available} bytes")]
    DeclaredLengthOverrun { declared: usize, available: usize },

    /// Not even room for type, version and name length
    #[error("Data too small for headers: expected more than {header}, got {actual}")]
    TooShortForHeader { header: usize, actual: usize },

    /// Record type other than the supported one
    #[error("Unsupported type {0}")]
    UnsupportedType(u8),

    /// Record version other than the supported one
    #[error("Unsupported version {0}")]
    UnsupportedVersion(u8),

    /// Data ends before the algorithm id
    #[error("Data too small for payload: expected at least {expected}, got {actual}")]
    TooShortForPayload { expected: usize, actual: usize },

    /// Name plus terminator does not fit a slot
    #[error("Collection name too big: expected max {capacity}, got {required}")]
    CollectionNameTooLong { required: usize, capacity: usize },
}

/// The signature section is missing or has an unacceptable size.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SignatureRangeError {
    /// No signature length byte after the payload
    #[error("Data too short to hold signature length")]
    MissingLength,

    /// Length byte outside the DER bounds of the curve
    #[error("Signature length must be between {min} and {max}, got {length}")]
    LengthOutOfRange { length: usize, min: usize, max: usize },

    /// Fewer trailing bytes than the length byte announces
    #[error("Signature could not fit in data: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
}

/// Reasons a provisioning request is rejected.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ProvisionError {
    /// Record failed structural validation
    #[error("Malformed record: {0}")]
    Structural(#[from] StructuralError),

    /// Key identifier not in the trust registry
    #[error("Key id {0} not supported")]
    UnknownKey(u8),

    /// Algorithm identifier not in the closed set (or not usable with the key)
    #[error("Unsupported algorithm id {0}")]
    UnsupportedAlgorithm(u8),

    /// Signature length out of bounds or signature truncated
    #[error("Invalid signature section: {0}")]
    SignatureRange(#[from] SignatureRangeError),

    /// Signature did not verify against the trusted key
    #[error("Invalid NFT signature")]
    Authenticity,
}

impl ProvisionError {
    /// Status reported to the dispatcher. Identical for every variant.
    pub fn status(&self) -> StatusWord {
        StatusWord::INVALID_DATA
    }
}
