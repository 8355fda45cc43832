//! # k256 Crypto Provider
//!
//! Implements [`CryptoProvider`] with `sha2` and `k256`.
//!
//! ## Security Notes
//!
//! - Public keys are parsed from SEC1 bytes on every call; an invalid key
//!   simply fails verification
//! - Signatures must be strict DER
//! - High-S signatures are valid ECDSA and are accepted: `s` is normalized
//!   before k256 verifies, since k256 only accepts the low-S form

use crate::domain::algorithm::{DigestKind, VerifyRoutine};
use crate::domain::entities::Digest;
use crate::domain::registry::Curve;
use crate::ports::outbound::CryptoProvider;
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{Signature, VerifyingKey};
use sha2::{Digest as _, Sha256};
use tracing::debug;

/// Production crypto provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct K256CryptoProvider;

impl K256CryptoProvider {
    /// Create a new provider.
    pub fn new() -> Self {
        Self
    }
}

impl CryptoProvider for K256CryptoProvider {
    fn digest(&self, kind: DigestKind, data: &[u8]) -> Digest {
        match kind {
            DigestKind::Sha256 => Sha256::digest(data).into(),
        }
    }

    fn verify(
        &self,
        routine: VerifyRoutine,
        curve: Curve,
        public_key: &[u8],
        digest_kind: DigestKind,
        digest: &Digest,
        signature: &[u8],
    ) -> bool {
        if digest.len() != digest_kind.output_len() {
            return false;
        }

        match (routine, curve) {
            (VerifyRoutine::EcdsaDer, Curve::Secp256k1) => {
                verify_secp256k1_der(public_key, digest, signature)
            }
        }
    }
}

fn verify_secp256k1_der(public_key: &[u8], digest: &Digest, signature: &[u8]) -> bool {
    let verifying_key = match VerifyingKey::from_sec1_bytes(public_key) {
        Ok(key) => key,
        Err(_) => {
            debug!("trusted key is not a valid secp256k1 point");
            return false;
        }
    };

    let signature = match Signature::from_der(signature) {
        Ok(sig) => sig,
        Err(_) => {
            debug!("signature is not valid DER");
            return false;
        }
    };

    let signature = signature.normalize_s().unwrap_or(signature);

    verifying_key.verify_prehash(digest, &signature).is_ok()
}
