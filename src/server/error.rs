use thiserror::Error;

use crate::store::StoreError;

pub type ServerResult<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid server url: {input:?}")]
    InvalidUrl { input: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServerError {
    pub fn is_invalid_url(&self) -> bool {
        matches!(self, Self::InvalidUrl { .. })
    }
}
