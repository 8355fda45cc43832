//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API the command dispatcher calls
//! - **Outbound (Driven)**: Cryptographic primitives this crate needs

pub mod inbound;
pub mod outbound;
