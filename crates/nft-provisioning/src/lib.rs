//! # NFT Metadata Provisioning
//!
//! Accepts signed NFT collection metadata records from an untrusted host,
//! authenticates them against a small set of built-in keys and caches the
//! result for the transaction display flow.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Record decoding, trust registry, verification, slot store
//! - **Ports Layer** (`ports/`): Trait definitions for inbound/outbound interfaces
//! - **Adapters Layer** (`adapters/`): k256/sha2 crypto provider
//! - **Service Layer** (`service.rs`): Wires the pipeline to the ports
//!
//! ## Record Format
//!
//! ```text
//! type(1) | version(1) | nameLen(1) | name(nameLen) | address(20) |
//! chainId(8, BE) | keyId(1) | algorithmId(1) | sigLen(1) | signature(sigLen)
//! ```
//!
//! Everything up to and including `algorithmId` is signed (SHA-256, ECDSA
//! secp256k1, DER).
//!
//! ## Security Notes
//!
//! - **No partial writes**: the session is only touched once a record is verified
//! - **Release hardening**: the test key and the signature bypass are refused
//!   by configuration validation in release builds
//! - **Chain id**: parsed and signed but not compared against the active chain

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(test)]
mod test_helpers;

// Re-export public API
pub use adapters::crypto::K256CryptoProvider;
pub use config::{BuildProfile, ConfigError, ProvisioningConfig, ProvisioningConfigBuilder};
pub use domain::algorithm::{lookup_suite, AlgorithmSuite, SignatureAlgorithm};
pub use domain::decoder::decode_record;
pub use domain::entities::{
    Authenticity, CollectionName, ContractAddress, DecodedRecord, MetadataSlot, PluginType,
    StatusWord, VerifiedRecord, MAX_ITEMS,
};
pub use domain::errors::{ProvisionError, SignatureRangeError, StructuralError};
pub use domain::registry::{Curve, TrustRegistry, TrustedKey, NFT_METADATA_KEY_ID, TEST_KEY_ID};
pub use domain::session::SessionContext;
pub use domain::verifier::RecordVerifier;
pub use ports::inbound::NftProvisioningApi;
pub use ports::outbound::CryptoProvider;
pub use service::NftProvisioningService;
