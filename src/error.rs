use crate::domain::ports::StoreError;
use crate::domain::validation::ValidationError;
use thiserror::Error;

/// Everything a bundle invocation can fail with.
///
/// Validation errors are raised before any write; store errors abort the
/// remaining sequence and pass through untouched.
#[derive(Error, Debug)]
pub enum BundleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, BundleError>;
