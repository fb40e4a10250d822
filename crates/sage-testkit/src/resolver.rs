//! An in-memory `DidResolver` backed by a plain map, grounded on the same
//! shape as `sage-resolver::CachingResolver`'s inner table but with no
//! caching semantics of its own — every lookup reflects the map as it
//! stands at call time.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use sage_resolver::{DidResolver, ResolveError};
use sage_types::agent::AgentRecord;
use sage_types::did::Did;

#[derive(Default)]
pub struct InMemoryResolver {
    records: RwLock<HashMap<Did, AgentRecord>>,
}

impl InMemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, record: AgentRecord) {
        self.records.write().await.insert(record.did.clone(), record);
    }

    pub async fn remove(&self, did: &Did) {
        self.records.write().await.remove(did);
    }
}

#[async_trait]
impl DidResolver for InMemoryResolver {
    async fn resolve(&self, did: &Did) -> Result<AgentRecord, ResolveError> {
        let record = self.records.read().await.get(did).cloned().ok_or(ResolveError::NotFound)?;
        if !record.is_usable() {
            return Err(ResolveError::Inactive);
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::agent_record;

    #[tokio::test]
    async fn resolves_inserted_record() {
        let resolver = InMemoryResolver::new();
        let (record, _, _) = agent_record("did:sage:test:550e8400-e29b-41d4-a716-446655440001");
        let did = record.did.clone();
        resolver.insert(record).await;

        let resolved = resolver.resolve(&did).await.unwrap();
        assert_eq!(resolved.did, did);
    }

    #[tokio::test]
    async fn unknown_did_is_not_found() {
        let resolver = InMemoryResolver::new();
        let did = Did::parse("did:sage:test:550e8400-e29b-41d4-a716-446655440099").unwrap();
        assert_eq!(resolver.resolve(&did).await.unwrap_err(), ResolveError::NotFound);
    }

    #[tokio::test]
    async fn inactive_record_is_rejected() {
        let resolver = InMemoryResolver::new();
        let (mut record, _, _) = agent_record("did:sage:test:550e8400-e29b-41d4-a716-446655440001");
        record.is_active = false;
        let did = record.did.clone();
        resolver.insert(record).await;

        assert_eq!(resolver.resolve(&did).await.unwrap_err(), ResolveError::Inactive);
    }
}
