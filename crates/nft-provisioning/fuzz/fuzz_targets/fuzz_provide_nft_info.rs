//! Fuzz target for the NFT provisioning pipeline.
//!
//! Feeds arbitrary buffers and declared lengths through decode, verify and
//! commit. No input may panic, and a rejected input must leave the session
//! exactly as it was.
//!
//! ## Running
//!
//! ```bash
//! cd crates/nft-provisioning
//! cargo +nightly fuzz run fuzz_provide_nft_info
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use nft_provisioning::{
    NftProvisioningApi, NftProvisioningService, PluginType, SessionContext, StatusWord,
};

/// Fuzz input structure for one provisioning command.
#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    /// Raw command data
    buffer: Vec<u8>,
    /// Length claimed by the host, may exceed the buffer
    declared_length: u16,
    /// Start from a session with a routing decision already made
    preset_plugin_type: bool,
}

fuzz_target!(|input: FuzzInput| {
    let service = NftProvisioningService::production();
    let mut session = SessionContext::new();
    if input.preset_plugin_type {
        session.set_plugin_type(PluginType::OldInternal);
    }
    let before = session.clone();

    let status = service.handle_provide_nft_information(
        &mut session,
        &input.buffer,
        usize::from(input.declared_length),
    );

    // Only signatures by the production key commit anything
    if status != StatusWord::OK {
        assert_eq!(status, StatusWord::INVALID_DATA);
        assert_eq!(session, before);
    }
});
