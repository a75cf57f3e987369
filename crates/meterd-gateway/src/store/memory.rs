use async_trait::async_trait;
use tokio::sync::RwLock;

use meterd_core::error::{MeterError, Result};
use meterd_core::Meter;

use super::MeterStore;

/// Process-lifetime store backed by a `Vec` under a single lock.
///
/// Ids come from a monotonic counter. A candidate already present in the
/// store (e.g. a seeded record) is skipped, so ids are never handed out twice.
#[derive(Debug, Default)]
pub struct InMemoryMeterStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    meters: Vec<Meter>,
    next_id: u64,
}

impl Inner {
    fn position(&self, id: &str) -> Option<usize> {
        self.meters.iter().position(|m| m.id == id)
    }

    fn allocate_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let candidate = self.next_id.to_string();
            if self.position(&candidate).is_none() {
                return candidate;
            }
        }
    }
}

impl InMemoryMeterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `meters`, in the given order.
    ///
    /// Fails on duplicate or empty ids. The id counter starts after the
    /// largest numeric id seen.
    pub fn with_meters(meters: Vec<Meter>) -> Result<Self> {
        let mut next_id = 0;
        for (i, m) in meters.iter().enumerate() {
            if m.id.is_empty() {
                return Err(MeterError::BadRequest(format!("seed meter #{i} has an empty id")));
            }
            if meters[..i].iter().any(|prev| prev.id == m.id) {
                return Err(MeterError::BadRequest(format!("duplicate seed meter id: {}", m.id)));
            }
            if let Ok(n) = m.id.parse::<u64>() {
                next_id = next_id.max(n);
            }
        }

        Ok(Self {
            inner: RwLock::new(Inner { meters, next_id }),
        })
    }
}

#[async_trait]
impl MeterStore for InMemoryMeterStore {
    async fn list(&self) -> Vec<Meter> {
        self.inner.read().await.meters.clone()
    }

    async fn get(&self, id: &str) -> Result<Meter> {
        let inner = self.inner.read().await;
        inner
            .meters
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(MeterError::NotFound)
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Meter> {
        let inner = self.inner.read().await;
        inner
            .meters
            .iter()
            .find(|m| m.slug == slug)
            .cloned()
            .ok_or(MeterError::NotFound)
    }

    async fn insert(&self, mut meter: Meter) -> Meter {
        let mut inner = self.inner.write().await;
        meter.id = inner.allocate_id();
        inner.meters.push(meter.clone());
        meter
    }

    async fn update(&self, id: &str, mut meter: Meter) -> Result<Meter> {
        let mut inner = self.inner.write().await;
        let idx = inner.position(id).ok_or(MeterError::NotFound)?;
        meter.id = id.to_string();
        inner.meters[idx] = meter.clone();
        Ok(meter)
    }

    async fn remove(&self, id: &str) -> Result<Meter> {
        let mut inner = self.inner.write().await;
        let idx = inner.position(id).ok_or(MeterError::NotFound)?;
        Ok(inner.meters.remove(idx))
    }

    async fn len(&self) -> usize {
        self.inner.read().await.meters.len()
    }
}

#[cfg(test)]
mod tests {
    use meterd_core::model::fixtures;

    use super::*;

    fn named(project: &str) -> Meter {
        Meter {
            project_name: project.to_string(),
            slug: project.to_lowercase(),
            ..Meter::default()
        }
    }

    fn ids(meters: &[Meter]) -> Vec<&str> {
        meters.iter().map(|m| m.id.as_str()).collect()
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids_after_seed() {
        let store = InMemoryMeterStore::with_meters(fixtures()).unwrap();
        let a = store.insert(named("a")).await;
        let b = store.insert(named("b")).await;
        assert_eq!(a.id, "6");
        assert_eq!(b.id, "7");
        assert_eq!(store.len().await, 7);
    }

    #[tokio::test]
    async fn insert_overwrites_caller_id() {
        let store = InMemoryMeterStore::new();
        let mut m = named("a");
        m.id = "will-be-omitted".into();
        let stored = store.insert(m).await;
        assert_eq!(stored.id, "1");
        assert!(store.get("will-be-omitted").await.is_err());
    }

    #[tokio::test]
    async fn allocator_skips_taken_ids() {
        let mut seeded = named("x");
        seeded.id = "2".into();
        let store = InMemoryMeterStore::with_meters(vec![seeded]).unwrap();
        // counter starts after 2
        assert_eq!(store.insert(named("y")).await.id, "3");

        let mut odd = named("z");
        odd.id = "abc".into();
        let mut one = named("w");
        one.id = "1".into();
        let store = InMemoryMeterStore::with_meters(vec![odd, one]).unwrap();
        assert_eq!(store.insert(named("v")).await.id, "2");
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = InMemoryMeterStore::new();
        let a = store.insert(named("a")).await;
        store.remove(&a.id).await.unwrap();
        let b = store.insert(named("b")).await;
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn list_preserves_order_across_creates_and_deletes() {
        let store = InMemoryMeterStore::with_meters(fixtures()).unwrap();
        let a = store.insert(named("a")).await;
        let b = store.insert(named("b")).await;
        store.remove("2").await.unwrap();
        store.remove(&a.id).await.unwrap();

        let all = store.list().await;
        assert_eq!(ids(&all), vec!["1", "3", "4", "5", b.id.as_str()]);
    }

    #[tokio::test]
    async fn slug_lookup_returns_first_match() {
        let store = InMemoryMeterStore::new();
        let first = store.insert(named("Dup")).await;
        store.insert(named("dup")).await;
        assert_eq!(store.get_by_slug("dup").await.unwrap().id, first.id);
        assert!(matches!(
            store.get_by_slug("missing").await,
            Err(MeterError::NotFound)
        ));
    }

    #[tokio::test]
    async fn update_keeps_id_and_position() {
        let store = InMemoryMeterStore::with_meters(fixtures()).unwrap();
        let mut replacement = named("Renamed");
        replacement.id = "999".into();
        let updated = store.update("3", replacement).await.unwrap();
        assert_eq!(updated.id, "3");

        let all = store.list().await;
        assert_eq!(ids(&all), vec!["1", "2", "3", "4", "5"]);
        assert_eq!(all[2].project_name, "Renamed");
    }

    #[tokio::test]
    async fn missing_ids_leave_store_unchanged() {
        let store = InMemoryMeterStore::with_meters(fixtures()).unwrap();
        assert!(matches!(store.remove("42").await, Err(MeterError::NotFound)));
        assert!(matches!(
            store.update("42", named("x")).await,
            Err(MeterError::NotFound)
        ));
        assert_eq!(store.list().await, fixtures());
    }

    #[test]
    fn seeding_rejects_duplicates() {
        let mut twice = fixtures();
        twice.push(fixtures().remove(0));
        assert!(InMemoryMeterStore::with_meters(twice).is_err());
        assert!(InMemoryMeterStore::with_meters(vec![named("no-id")]).is_err());
    }
}
