//! # Signature Algorithms
//!
//! Closed set of algorithms a record may name. Each algorithm maps, through a
//! const table, to the curve, digest and verification routine used to check
//! it. Supporting a new algorithm means adding a variant and a table row.

use super::registry::Curve;
use serde::{Deserialize, Serialize};

/// Digest applied to the unsigned payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestKind {
    /// SHA-256
    Sha256,
}

impl DigestKind {
    /// Digest output size in bytes.
    pub const fn output_len(self) -> usize {
        match self {
            DigestKind::Sha256 => 32,
        }
    }
}

/// Signature check applied to the digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerifyRoutine {
    /// ECDSA over a prehashed message, DER-encoded signature
    EcdsaDer,
}

/// Wire identifier of ECDSA secp256k1 over SHA-256.
pub const ALGORITHM_ECDSA_SECP256K1_SHA256: u8 = 1;

/// Algorithms a record may name in its `algorithmId` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SignatureAlgorithm {
    /// ECDSA on secp256k1 over SHA-256
    EcdsaSecp256k1Sha256 = ALGORITHM_ECDSA_SECP256K1_SHA256,
}

/// (curve, digest, verify routine) triple for one algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlgorithmSuite {
    /// Algorithm this row describes
    pub algorithm: SignatureAlgorithm,
    /// Curve the signing key must be on
    pub curve: Curve,
    /// Digest of the unsigned payload
    pub digest: DigestKind,
    /// Signature check
    pub verify: VerifyRoutine,
}

static ALGORITHM_SUITES: [AlgorithmSuite; 1] = [AlgorithmSuite {
    algorithm: SignatureAlgorithm::EcdsaSecp256k1Sha256,
    curve: Curve::Secp256k1,
    digest: DigestKind::Sha256,
    verify: VerifyRoutine::EcdsaDer,
}];

impl SignatureAlgorithm {
    /// Wire identifier.
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Algorithm for a wire identifier, if supported.
    pub fn from_id(id: u8) -> Option<Self> {
        lookup_suite(id).map(|suite| suite.algorithm)
    }

    /// Table row for this algorithm.
    pub fn suite(self) -> &'static AlgorithmSuite {
        match self {
            SignatureAlgorithm::EcdsaSecp256k1Sha256 => &ALGORITHM_SUITES[0],
        }
    }
}

/// Table row for a wire identifier.
pub fn lookup_suite(algorithm_id: u8) -> Option<&'static AlgorithmSuite> {
    ALGORITHM_SUITES
        .iter()
        .find(|suite| suite.algorithm.id() == algorithm_id)
}
