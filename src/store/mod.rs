//! The document-store collaborator.
//!
//! Persistence itself lives outside this crate. The core only assumes a
//! store with five collections and the handful of operations below; the
//! bundled [`MemoryStore`] covers tests and embedders that don't need
//! durability.

use uuid::Uuid;

use crate::error::StoreError;

pub mod memory;

pub use memory::MemoryStore;

pub const ROOTBEERS: &str = "rootbeers";
pub const REVIEWS: &str = "reviews";
pub const FLAVOR_NOTES: &str = "flavor_notes";
pub const COLORS: &str = "colors";
pub const SERVING_CONTEXTS: &str = "serving_contexts";

/// Something that lives in one of the store's collections.
pub trait Document: Clone + Send + Sync + 'static {
    /// Which collection this document belongs to.
    const COLLECTION: &'static str;

    fn id(&self) -> Uuid;
}

/// The operations the core needs from a document store.
///
/// Every method is one logical unit of work. Implementations map failures to
/// [`StoreError`]; the core surfaces those as fatal for the current request
/// and never retries.
#[allow(async_fn_in_trait)]
pub trait DocumentStore: Send + Sync {
    /// Inserts a new document. Fails if the id is already taken.
    async fn insert<D: Document>(&self, doc: D) -> Result<(), StoreError>;

    /// Fetches one document by id.
    async fn get<D: Document>(&self, id: Uuid) -> Result<Option<D>, StoreError>;

    /// Fetches every document matching `pred`, in stable id order.
    async fn find<D, P>(&self, pred: P) -> Result<Vec<D>, StoreError>
    where
        D: Document,
        P: Fn(&D) -> bool + Send;

    /// Overwrites the document with the same id. Returns whether anything
    /// was there to overwrite.
    async fn replace<D: Document>(&self, doc: D) -> Result<bool, StoreError>;

    /// Deletes one document by id. Returns whether it existed.
    async fn remove<D: Document>(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Counts the documents in `D`'s collection.
    async fn count<D: Document>(&self) -> Result<u64, StoreError>;
}
