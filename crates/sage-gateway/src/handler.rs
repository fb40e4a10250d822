//! Application dispatch port (§4.9 step 6): what the orchestrator calls
//! once a packet has cleared every security check and been decrypted.
//! Mirrors `sage-resolver::DidResolver` and `sage-stores::NonceStore` —
//! a driven port the embedder implements, not a concrete type this
//! crate provides.

use async_trait::async_trait;

use sage_types::error::CoreError;
use sage_types::session::Session;

#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Handles one decrypted packet body and returns the plaintext reply
    /// to seal and send back. `session` is the already-loaded, not-yet
    /// `touch`-ed session this packet belongs to.
    async fn handle(&self, session: &Session, plaintext: Vec<u8>) -> Result<Vec<u8>, CoreError>;
}
