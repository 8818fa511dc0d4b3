//! An in-process store over locked maps.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;

use super::{Document, DocumentStore};

type Bucket = BTreeMap<Uuid, Box<dyn Any + Send + Sync>>;

/// A document store that lives entirely in memory.
///
/// Collections are keyed by name; documents are kept in id order so that
/// repeated reads come back in the same order every time.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<&'static str, Bucket>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    async fn insert<D: Document>(&self, doc: D) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let bucket = collections.entry(D::COLLECTION).or_default();
        if bucket.contains_key(&doc.id()) {
            return Err(StoreError::WriteRejected {
                collection: D::COLLECTION,
                reason: format!("id `{}` already exists", doc.id()),
            });
        }
        bucket.insert(doc.id(), Box::new(doc));
        Ok(())
    }

    async fn get<D: Document>(&self, id: Uuid) -> Result<Option<D>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(D::COLLECTION)
            .and_then(|bucket| bucket.get(&id))
            .and_then(|boxed| boxed.downcast_ref::<D>())
            .cloned())
    }

    async fn find<D, P>(&self, pred: P) -> Result<Vec<D>, StoreError>
    where
        D: Document,
        P: Fn(&D) -> bool + Send,
    {
        let collections = self.collections.read().await;
        let Some(bucket) = collections.get(D::COLLECTION) else {
            return Ok(Vec::new());
        };
        Ok(bucket
            .values()
            .filter_map(|boxed| boxed.downcast_ref::<D>())
            .filter(|doc| pred(doc))
            .cloned()
            .collect())
    }

    async fn replace<D: Document>(&self, doc: D) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        let bucket = collections.entry(D::COLLECTION).or_default();
        if !bucket.contains_key(&doc.id()) {
            return Ok(false);
        }
        bucket.insert(doc.id(), Box::new(doc));
        Ok(true)
    }

    async fn remove<D: Document>(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(D::COLLECTION)
            .is_some_and(|bucket| bucket.remove(&id).is_some()))
    }

    async fn count<D: Document>(&self) -> Result<u64, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(D::COLLECTION)
            .map_or(0, |bucket| bucket.len() as u64))
    }
}
