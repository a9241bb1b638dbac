use thiserror::Error;

/// Errors that abort an operation and are surfaced to the caller
#[derive(Error, Debug)]
pub enum AppError {
    /// The recipe provider reported a failure
    #[error("Failed to fetch: {0}")]
    Fetch(String),

    /// Transport level failure talking to the recipe provider
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed JSON from the provider or from storage
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem failure in a storage backend
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The storage collaborator could not complete a read or write
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// An action needs a loaded recipe but none is active
    #[error("No recipe is currently loaded")]
    NoActiveRecipe,

    /// An action needs a search but none is active
    #[error("No search is currently active")]
    NoActiveSearch,

    /// Page numbers and page sizes start at 1
    #[error("Invalid page {page} (page size {page_size})")]
    InvalidPage { page: u32, page_size: u32 },

    /// The page lies beyond the last page of results
    #[error("Page {page} is out of range (1..={num_pages})")]
    PageOutOfRange { page: u32, num_pages: u32 },

    /// The operation was rejected and nothing changed
    #[error("Rejected: {0}")]
    Rejected(#[from] InvariantViolation),
}

impl AppError {
    /// True when the error only reports a no-op
    pub fn is_rejected(&self) -> bool {
        matches!(self, AppError::Rejected(_))
    }
}

/// Failure to read a quantity out of ingredient text.
///
/// Always recovered inside the ingredient parser.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Not a quantity: {0:?}")]
    NotAQuantity(String),

    #[error("Zero denominator in {0:?}")]
    ZeroDenominator(String),
}

/// Operations rejected as no-ops. None of these are fatal; they tell the
/// caller that nothing changed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("Servings cannot go below 1")]
    ServingsAtMinimum,

    #[error("No list item with id {0}")]
    UnknownListItem(String),

    #[error("Count must be a finite number, got {0}")]
    NonFiniteCount(f64),

    #[error("Recipe {0} is already liked")]
    AlreadyLiked(String),
}
