use thiserror::Error;

use crate::server::ServerError;
use crate::state::StateError;
use crate::store::StoreError;

pub type ShellResult<T> = std::result::Result<T, ShellError>;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Server(#[from] ServerError),
    #[error(transparent)]
    State(#[from] StateError),
}

impl From<StoreError> for ShellError {
    fn from(error: StoreError) -> Self {
        Self::Server(ServerError::Store(error))
    }
}

impl ShellError {
    pub fn is_invalid_url(&self) -> bool {
        matches!(self, Self::Server(error) if error.is_invalid_url())
    }
}
