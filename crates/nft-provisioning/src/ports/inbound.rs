//! # Inbound Ports (Driving Ports / API)
//!
//! Entry point the command dispatcher uses to provision NFT metadata.

use crate::domain::entities::StatusWord;
use crate::domain::errors::ProvisionError;
use crate::domain::session::SessionContext;

/// NFT metadata provisioning API.
///
/// The session is borrowed mutably for the whole call: one command at a
/// time, run to completion.
pub trait NftProvisioningApi: Send + Sync {
    /// Decode, authenticate and commit one signed record.
    ///
    /// Only the first `declared_length` bytes of `buffer` are read.
    /// Returns the index of the slot written. On error the session is left
    /// exactly as it was.
    fn provide_nft_information(
        &self,
        session: &mut SessionContext,
        buffer: &[u8],
        declared_length: usize,
    ) -> Result<usize, ProvisionError>;

    /// Same as [`provide_nft_information`](Self::provide_nft_information),
    /// reduced to the status word returned to the host.
    fn handle_provide_nft_information(
        &self,
        session: &mut SessionContext,
        buffer: &[u8],
        declared_length: usize,
    ) -> StatusWord {
        match self.provide_nft_information(session, buffer, declared_length) {
            Ok(_) => StatusWord::OK,
            Err(err) => err.status(),
        }
    }
}
