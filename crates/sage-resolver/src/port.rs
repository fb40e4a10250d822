//! # Driven Port (Outbound SPI)
//!
//! The interface this subsystem requires the host application to implement,
//! per §5 "Ports" (`DidResolver`).

use std::sync::Arc;

use async_trait::async_trait;
use sage_types::agent::AgentRecord;
use sage_types::did::Did;

use crate::error::ResolveError;

/// Resolves a DID to the `AgentRecord` published for it.
///
/// Implementations must be `Send + Sync` to support concurrent access from
/// the handshake and validation pipelines. A resolver that wraps a remote
/// registry (on-chain or otherwise) should enforce its own timeout and map
/// it to [`ResolveError::Timeout`] rather than hanging a caller.
#[async_trait]
pub trait DidResolver: Send + Sync {
    /// Resolves `did` to its published `AgentRecord`.
    ///
    /// Returns [`ResolveError::NotFound`] if no record is published, and
    /// [`ResolveError::Inactive`] if one is published but
    /// [`AgentRecord::is_usable`] returns `false`. Callers that need the
    /// inactive record itself (for audit logging) should call a concrete
    /// resolver's non-trait lookup instead; this port only returns usable
    /// records as `Ok`.
    async fn resolve(&self, did: &Did) -> Result<AgentRecord, ResolveError>;
}

#[async_trait]
impl<T: DidResolver + ?Sized> DidResolver for Arc<T> {
    async fn resolve(&self, did: &Did) -> Result<AgentRecord, ResolveError> {
        (**self).resolve(did).await
    }
}
