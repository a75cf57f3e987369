//! Meter storage seam.
//!
//! Handlers only see `Arc<dyn MeterStore>`; the in-memory implementation is the
//! one shipped today. Every miss is reported as `MeterError::NotFound` and the
//! caller decides how to surface it.

pub mod memory;

use async_trait::async_trait;

use meterd_core::error::Result;
use meterd_core::Meter;

pub use memory::InMemoryMeterStore;

/// Ordered collection of meters keyed by unique id.
#[async_trait]
pub trait MeterStore: Send + Sync {
    /// All meters in insertion order.
    async fn list(&self) -> Vec<Meter>;

    async fn get(&self, id: &str) -> Result<Meter>;

    /// First meter (in store order) whose slug matches.
    async fn get_by_slug(&self, slug: &str) -> Result<Meter>;

    /// Assign a fresh id to `meter`, append it, and return the stored copy.
    async fn insert(&self, meter: Meter) -> Meter;

    /// Replace the meter stored under `id`. The stored record keeps `id`.
    async fn update(&self, id: &str, meter: Meter) -> Result<Meter>;

    /// Remove the meter stored under `id`, preserving the order of the rest.
    async fn remove(&self, id: &str) -> Result<Meter>;

    async fn len(&self) -> usize;
}
