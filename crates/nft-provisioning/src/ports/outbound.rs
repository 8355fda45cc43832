//! # Outbound Ports (Driven Ports / SPI)
//!
//! Cryptographic primitives the pipeline depends on. They are trusted black
//! boxes; the pipeline only relies on the contracts documented here.

use crate::domain::algorithm::{DigestKind, VerifyRoutine};
use crate::domain::entities::Digest;
use crate::domain::registry::Curve;

/// Hashing and signature verification primitives.
pub trait CryptoProvider: Send + Sync {
    /// Hash `data` with the given digest.
    fn digest(&self, kind: DigestKind, data: &[u8]) -> Digest;

    /// Check `signature` over `digest` against `public_key`.
    ///
    /// Returns `false` for any malformed key or signature; never panics.
    fn verify(
        &self,
        routine: VerifyRoutine,
        curve: Curve,
        public_key: &[u8],
        digest_kind: DigestKind,
        digest: &Digest,
        signature: &[u8],
    ) -> bool;
}

impl<T: CryptoProvider + ?Sized> CryptoProvider for &T {
    fn digest(&self, kind: DigestKind, data: &[u8]) -> Digest {
        (**self).digest(kind, data)
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
        (**self).verify(routine, curve, public_key, digest_kind, digest, signature)
    }
}
