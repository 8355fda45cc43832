//! # NFT Provisioning Service
//!
//! Application service implementing [`NftProvisioningApi`].
//!
//! ## Pipeline
//!
//! ```text
//! Start → Decoding → Decoded | Rejected(structural)
//!       → Verifying → Verified | Rejected(crypto | unsupported)
//!       → Committed
//! ```
//!
//! Nothing is written to the session before the verifier succeeds, so a
//! rejected request has no observable side effect beyond its log line.

use crate::adapters::crypto::K256CryptoProvider;
use crate::config::{ConfigError, ProvisioningConfig};
use crate::domain::decoder::decode_record;
use crate::domain::entities::{Authenticity, PluginType};
use crate::domain::errors::ProvisionError;
use crate::domain::registry::TrustRegistry;
use crate::domain::session::SessionContext;
use crate::domain::verifier::RecordVerifier;
use crate::ports::inbound::NftProvisioningApi;
use crate::ports::outbound::CryptoProvider;
use tracing::{debug, info, instrument, warn};

/// NFT Provisioning Service.
///
/// Owns the verifier (trusted keys + crypto provider); the session is
/// supplied per call.
pub struct NftProvisioningService<C: CryptoProvider> {
    verifier: RecordVerifier<C>,
    config: ProvisioningConfig,
}

impl<C: CryptoProvider> NftProvisioningService<C> {
    /// Create a service with the built-in trusted keys.
    ///
    /// # Errors
    /// * `ConfigError` - configuration not allowed in this build profile
    pub fn new(crypto: C, config: ProvisioningConfig) -> Result<Self, ConfigError> {
        let registry = TrustRegistry::new(&config);
        Self::with_registry(crypto, registry, config)
    }

    /// Create a service with an explicit set of trusted keys.
    ///
    /// # Errors
    /// * `ConfigError` - configuration not allowed in this build profile, or
    ///   `registry` trusts the test key without `enable_test_key`
    pub fn with_registry(
        crypto: C,
        registry: TrustRegistry,
        config: ProvisioningConfig,
    ) -> Result<Self, ConfigError> {
        let verifier = RecordVerifier::new(crypto, registry, &config)?;

        if !config.require_authenticity {
            warn!("signature enforcement disabled: test fixtures only");
        }

        Ok(Self { verifier, config })
    }

    /// Active configuration.
    pub fn config(&self) -> &ProvisioningConfig {
        &self.config
    }

    /// Trusted keys in use.
    pub fn registry(&self) -> &TrustRegistry {
        self.verifier.registry()
    }

    /// Crypto provider in use.
    pub fn crypto(&self) -> &C {
        self.verifier.crypto()
    }
}

impl NftProvisioningService<K256CryptoProvider> {
    /// Production service: k256 crypto, production key only, signatures
    /// enforced.
    pub fn production() -> Self {
        Self {
            verifier: RecordVerifier::production(K256CryptoProvider::new()),
            config: ProvisioningConfig::default(),
        }
    }
}

impl<C: CryptoProvider> NftProvisioningApi for NftProvisioningService<C> {
    #[instrument(skip(self, session, buffer))]
    fn provide_nft_information(
        &self,
        session: &mut SessionContext,
        buffer: &[u8],
        declared_length: usize,
    ) -> Result<usize, ProvisionError> {
        let result = decode_record(buffer, declared_length)
            .map_err(ProvisionError::from)
            .and_then(|record| {
                debug!(
                    collection = %record.collection_name,
                    address = %hex::encode(record.contract_address),
                    chain_id = record.chain_id,
                    key_id = record.key_id,
                    algorithm_id = record.algorithm_id,
                    "decoded NFT record"
                );
                self.verifier.verify(&record)
            });

        let verified = match result {
            Ok(verified) => verified,
            Err(err) => {
                warn!(error = %err, "NFT information rejected");
                return Err(err);
            }
        };

        let index = session.commit(&verified);
        // A following transaction must not be routed to a legacy internal plugin.
        session.set_plugin_type(PluginType::NotOldInternal);

        info!(
            slot = index,
            collection = %verified.collection_name(),
            address = %hex::encode(verified.contract_address()),
            bypassed = verified.authenticity() == Authenticity::Bypassed,
            "NFT information provisioned"
        );

        Ok(index)
    }
}

// =============================================================================
// TESTS
// =============================================================================
