//! # Domain Layer
//!
//! Record decoding, trust registry, algorithm table, verification and the
//! slot store. No I/O; cryptography is reached through
//! [`crate::ports::outbound::CryptoProvider`].

pub mod algorithm;
pub mod decoder;
pub mod entities;
pub mod errors;
pub mod registry;
pub mod session;
pub mod verifier;
