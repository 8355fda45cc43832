//! # Record Verifier
//!
//! Authenticates a decoded record against the trust registry.
//!
//! ## Order of checks
//!
//! 1. Key id resolves in the registry
//! 2. Algorithm id names a supported suite whose curve matches the key
//! 3. Digest of the unsigned payload
//! 4. Signature length byte present and within DER bounds
//! 5. Signature bytes present
//! 6. Signature verifies
//!
//! Steps 1 and 2 run before any cryptographic primitive is called.

use super::algorithm::lookup_suite;
use super::entities::{
    Authenticity, DecodedRecord, VerifiedRecord, MAX_DER_SIGNATURE_SIZE, MIN_DER_SIGNATURE_SIZE,
};
use super::errors::{ProvisionError, SignatureRangeError};
use super::registry::TrustRegistry;
use crate::config::{ConfigError, ProvisioningConfig};
use crate::ports::outbound::CryptoProvider;
use tracing::{debug, warn};

/// Split the signature section into the signature bytes.
///
/// Trailing bytes after the signature are ignored.
pub fn read_signature(signature_section: &[u8]) -> Result<&[u8], SignatureRangeError> {
    let (&length, rest) = signature_section
        .split_first()
        .ok_or(SignatureRangeError::MissingLength)?;
    let length = usize::from(length);

    if !(MIN_DER_SIGNATURE_SIZE..=MAX_DER_SIGNATURE_SIZE).contains(&length) {
        return Err(SignatureRangeError::LengthOutOfRange {
            length,
            min: MIN_DER_SIGNATURE_SIZE,
            max: MAX_DER_SIGNATURE_SIZE,
        });
    }

    rest.get(..length).ok_or(SignatureRangeError::Truncated {
        expected: length,
        actual: rest.len(),
    })
}

/// Checks record signatures against the trusted keys.
pub struct RecordVerifier<C: CryptoProvider> {
    crypto: C,
    registry: TrustRegistry,
    require_authenticity: bool,
}

impl<C: CryptoProvider> RecordVerifier<C> {
    /// Create a verifier.
    ///
    /// `config.require_authenticity = false` accepts records whose signature
    /// fails. Both that and a registry trusting the test key are refused in
    /// release builds.
    ///
    /// # Errors
    /// * `ConfigError` - configuration not allowed in this build profile, or
    ///   the registry trusts the test key without `enable_test_key`
    pub fn new(
        crypto: C,
        registry: TrustRegistry,
        config: &ProvisioningConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        if registry.trusts_test_key() && !config.enable_test_key {
            return Err(ConfigError::TestKeyNotEnabled);
        }

        Ok(Self {
            crypto,
            registry,
            require_authenticity: config.require_authenticity,
        })
    }

    /// Production verifier: NFT metadata key only, signatures enforced.
    pub(crate) fn production(crypto: C) -> Self {
        Self {
            crypto,
            registry: TrustRegistry::production(),
            require_authenticity: true,
        }
    }

    /// Trusted keys in use.
    pub fn registry(&self) -> &TrustRegistry {
        &self.registry
    }

    /// Crypto provider in use.
    pub fn crypto(&self) -> &C {
        &self.crypto
    }

    /// Authenticate `record`.
    pub fn verify(&self, record: &DecodedRecord<'_>) -> Result<VerifiedRecord, ProvisionError> {
        let key = self
            .registry
            .resolve(record.key_id)
            .ok_or(ProvisionError::UnknownKey(record.key_id))?;
        debug!(key_id = record.key_id, "resolved trusted key");

        let suite = lookup_suite(record.algorithm_id)
            .filter(|suite| suite.curve == key.curve)
            .ok_or(ProvisionError::UnsupportedAlgorithm(record.algorithm_id))?;
        debug!(algorithm = ?suite.algorithm, "selected algorithm suite");

        let digest = self.crypto.digest(suite.digest, record.unsigned_payload);

        let signature = read_signature(record.signature_section)?;
        debug!(signature_len = signature.len(), "read signature");

        let authentic = self.crypto.verify(
            suite.verify,
            suite.curve,
            &key.public_key,
            suite.digest,
            &digest,
            signature,
        );

        if authentic {
            return Ok(VerifiedRecord::new(record, Authenticity::Verified));
        }

        if self.require_authenticity {
            return Err(ProvisionError::Authenticity);
        }

        warn!(
            key_id = record.key_id,
            "invalid NFT signature accepted: signature enforcement disabled"
        );
        Ok(VerifiedRecord::new(record, Authenticity::Bypassed))
    }
}
