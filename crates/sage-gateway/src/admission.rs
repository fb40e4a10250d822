//! Admission control (§5 "Backpressure"): bounds the number of packets
//! processed concurrently so load beyond capacity is rejected with
//! `Overloaded` rather than queued without bound.
//!
//! Uses `tokio::sync::Semaphore` directly rather than a request-rate
//! limiter, since what needs bounding here is concurrency, not rate.

use std::sync::Arc;

use tokio::sync::{Semaphore, TryAcquireError};

use sage_types::error::{CoreError, ResourceError};

/// Caps the number of in-flight packets at `max_concurrent_packets`
/// (`SageConfig`). Cloning shares the same underlying limit.
#[derive(Clone)]
pub struct AdmissionControl {
    semaphore: Arc<Semaphore>,
}

/// Releases its slot back to the semaphore on drop, including on an
/// early return from the orchestrator.
pub struct AdmissionGuard(#[allow(dead_code)] tokio::sync::OwnedSemaphorePermit);

impl AdmissionControl {
    pub fn new(max_concurrent_packets: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent_packets)),
        }
    }

    /// Admits one packet, or fails immediately with `Overloaded` if the
    /// pool is already saturated. Never waits — per §5, backpressure
    /// means rejecting, not unbounded queueing.
    pub fn try_admit(&self) -> Result<AdmissionGuard, CoreError> {
        match Arc::clone(&self.semaphore).try_acquire_owned() {
            Ok(permit) => Ok(AdmissionGuard(permit)),
            Err(TryAcquireError::NoPermits) => Err(CoreError::Resource(ResourceError::Overloaded)),
            Err(TryAcquireError::Closed) => Err(CoreError::Internal),
        }
    }
}
