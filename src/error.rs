use core::error::Error;
use core::fmt;

use pisserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CellarError {
    #[error("Validation failed. See: `{_0}`")]
    Validation(#[from] ValidationError),

    #[error("Page {requested} is out of bounds. This result set has {total_pages} page(s).")]
    InvalidPage { requested: u32, total_pages: u32 },

    #[error("The document store reported an error. See: `{_0}`")]
    Storage(#[from] StoreError),

    #[error("No root beer with id `{_0}` exists.")]
    RootBeerNotFound(Uuid),

    #[error("No review with id `{_0}` exists.")]
    ReviewNotFound(Uuid),

    #[error("No vocabulary entry with id `{_0}` exists.")]
    VocabNotFound(Uuid),

    #[error("The image `{_0}` is not attached to this root beer.")]
    ImageNotFound(String),

    #[error("The image store failed to accept an upload. See: `{_0}`")]
    ImageStore(#[from] ImageStoreError),
}

/// Errors from the document-store collaborator.
///
/// The core never retries these. Retry policy belongs to whatever transport
/// layer sits above us.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("The document store is unavailable. See: `{_0}`")]
    Unavailable(String),

    #[error("The document store rejected a write to `{collection}`. See: `{reason}`")]
    WriteRejected {
        collection: &'static str,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// during fs read from disk
    #[error("Failed to read config file. See: `{_0}`")]
    ReadFailed(#[from] tokio::io::Error),

    /// parsing
    #[error("Failed to parse config file. See: `{_0}`")]
    ParseFailed(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum ImageStoreError {
    #[error("The image store refused the upload (content type `{content_type}`). See: `{reason}`")]
    UploadFailed {
        content_type: String,
        reason: String,
    },

    #[error("The image store could not delete `{url}`. See: `{reason}`")]
    DeleteFailed { url: String, reason: String },
}

/// What went wrong with one field of a draft.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("a value is required")]
    Missing,

    #[error("must be at most {_0} characters")]
    TooLong(usize),

    // f64 so a fractional reading like 11.5 is reported as entered
    #[error("must be between {min} and {max}, got {got}")]
    OutOfRange { min: f64, max: f64, got: f64 },

    #[error("references `{_0}`, which does not exist")]
    DanglingReference(Uuid),

    #[error("more than one image is flagged as primary")]
    MultiplePrimaryImages,

    #[error("must not be negative")]
    Negative,
}

/// One offending field of a submitted draft.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub error: FieldError,
}

/// Every offending field of a draft, so a form can re-render with a message
/// next to each one. Never just the first failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// True when any issue is a dangling reference to a vocabulary entry.
    pub fn has_dangling_reference(&self) -> bool {
        self.issues
            .iter()
            .any(|i| matches!(i.error, FieldError::DanglingReference(_)))
    }

    /// True when any issue is a rating or score outside its bounds.
    pub fn has_out_of_range(&self) -> bool {
        self.issues
            .iter()
            .any(|i| matches!(i.error, FieldError::OutOfRange { .. }))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid field(s):", self.issues.len())?;
        for issue in &self.issues {
            write!(f, " [{}: {}]", issue.field, issue.error)?;
        }
        Ok(())
    }
}

impl Error for ValidationError {}
