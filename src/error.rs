use thiserror::Error;

/// Failures of the product lookup path. `NotFound` and `Transport` stay
/// distinct all the way to the HTTP boundary so callers can tell a missing
/// barcode apart from a flaky upstream.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Product not found in database")]
    NotFound,
    #[error("nutrition source unavailable: {0}")]
    Transport(#[from] reqwest::Error),
}

impl LookupError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound)
    }
}
