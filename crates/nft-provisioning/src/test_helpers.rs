//! Test fixtures shared by the unit tests.

use crate::adapters::crypto::K256CryptoProvider;
use crate::domain::algorithm::{DigestKind, VerifyRoutine};
use crate::domain::entities::{ContractAddress, Digest, RECORD_TYPE_V1, RECORD_VERSION_V1};
use crate::domain::registry::{Curve, NFT_METADATA_KEY_ID, SECP256K1_UNCOMPRESSED_KEY_SIZE};
use crate::ports::outbound::CryptoProvider;
use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{Signature, SigningKey};
use sha2::{Digest as _, Sha256};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Generate a fresh secp256k1 keypair, public half SEC1-uncompressed.
pub fn generate_keypair() -> (SigningKey, [u8; SECP256K1_UNCOMPRESSED_KEY_SIZE]) {
    let signing_key = SigningKey::random(&mut rand::thread_rng());
    let public_key = uncompressed(&signing_key);
    (signing_key, public_key)
}

/// Signing key of the built-in test key (secret scalar 1).
pub fn test_signing_key() -> SigningKey {
    let mut secret = [0u8; 32];
    secret[31] = 1;
    SigningKey::from_slice(&secret).expect("scalar 1 is a valid secret")
}

/// SEC1-uncompressed public key of `signing_key`.
pub fn uncompressed(signing_key: &SigningKey) -> [u8; SECP256K1_UNCOMPRESSED_KEY_SIZE] {
    let point = signing_key.verifying_key().to_encoded_point(false);
    let mut public_key = [0u8; SECP256K1_UNCOMPRESSED_KEY_SIZE];
    public_key.copy_from_slice(point.as_bytes());
    public_key
}

/// Builds wire-format records field by field.
#[derive(Clone, Debug)]
pub struct RecordBuilder {
    record_type: u8,
    record_version: u8,
    collection_name: Vec<u8>,
    contract_address: ContractAddress,
    chain_id: u64,
    key_id: u8,
    algorithm_id: u8,
    signature: Option<Vec<u8>>,
}

impl RecordBuilder {
    pub const DEFAULT_NAME: &'static [u8] = b"Bored Ape Yacht Club";

    pub fn new() -> Self {
        Self {
            record_type: RECORD_TYPE_V1,
            record_version: RECORD_VERSION_V1,
            collection_name: Self::DEFAULT_NAME.to_vec(),
            contract_address: [
                0xbc, 0x4c, 0xa0, 0xed, 0xa7, 0x64, 0x7a, 0x8a, 0xb7, 0xc2, 0x06, 0x1c, 0x2e,
                0x11, 0x8a, 0x18, 0xa9, 0x36, 0xf1, 0x3d,
            ],
            chain_id: 1,
            key_id: NFT_METADATA_KEY_ID,
            algorithm_id: 1,
            signature: None,
        }
    }

    pub fn record_type(mut self, record_type: u8) -> Self {
        self.record_type = record_type;
        self
    }

    pub fn record_version(mut self, record_version: u8) -> Self {
        self.record_version = record_version;
        self
    }

    pub fn collection_name(mut self, name: &[u8]) -> Self {
        self.collection_name = name.to_vec();
        self
    }

    pub fn contract_address(mut self, address: ContractAddress) -> Self {
        self.contract_address = address;
        self
    }

    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn key_id(mut self, key_id: u8) -> Self {
        self.key_id = key_id;
        self
    }

    pub fn algorithm_id(mut self, algorithm_id: u8) -> Self {
        self.algorithm_id = algorithm_id;
        self
    }

    /// Raw signature bytes; the length byte is written by [`build`](Self::build).
    pub fn signature(mut self, signature: Vec<u8>) -> Self {
        self.signature = Some(signature);
        self
    }

    /// The signed portion of the record.
    pub fn payload(&self) -> Vec<u8> {
        let mut out = vec![
            self.record_type,
            self.record_version,
            self.collection_name.len() as u8,
        ];
        out.extend_from_slice(&self.collection_name);
        out.extend_from_slice(&self.contract_address);
        out.extend_from_slice(&self.chain_id.to_be_bytes());
        out.push(self.key_id);
        out.push(self.algorithm_id);
        out
    }

    /// Serialise; the signature section is omitted if no signature was set.
    pub fn build(&self) -> Vec<u8> {
        let mut out = self.payload();
        if let Some(signature) = &self.signature {
            out.push(signature.len() as u8);
            out.extend_from_slice(signature);
        }
        out
    }

    /// Sign the payload with `signing_key` (SHA-256, DER) and serialise.
    pub fn sign(self, signing_key: &SigningKey) -> Vec<u8> {
        let digest = Sha256::digest(self.payload());
        let signature: Signature = signing_key
            .sign_prehash(&digest)
            .expect("prehash signing failed");
        self.signature(signature.to_der().as_bytes().to_vec()).build()
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// k256 provider that counts how often each primitive is called.
#[derive(Debug, Default)]
pub struct RecordingCrypto {
    inner: K256CryptoProvider,
    digest_calls: AtomicUsize,
    verify_calls: AtomicUsize,
}

impl RecordingCrypto {
    pub fn digest_calls(&self) -> usize {
        self.digest_calls.load(Ordering::SeqCst)
    }

    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }
}

impl CryptoProvider for RecordingCrypto {
    fn digest(&self, kind: DigestKind, data: &[u8]) -> Digest {
        self.digest_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.digest(kind, data)
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
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .verify(routine, curve, public_key, digest_kind, digest, signature)
    }
}
