//! The image-store collaborator.
//!
//! Product photos live in an external bucket. The core hands bytes over on
//! upload and keeps only URL + primary-flag descriptors afterwards; it never
//! reads image data back.

use crate::error::ImageStoreError;

/// An external bucket for product photos.
#[allow(async_fn_in_trait)]
pub trait ImageStore: Send + Sync {
    /// Stores the bytes and returns a public URL for them.
    async fn upload(&self, bytes: &[u8], content_type: &str) -> Result<String, ImageStoreError>;

    /// Deletes the object behind `url`.
    ///
    /// Callers in this crate treat a failure here as a warning, not an
    /// abort: an orphaned object in the bucket beats a dangling reference
    /// in the database.
    async fn delete(&self, url: &str) -> Result<(), ImageStoreError>;
}
