use crate::shell::ShellError;
use crate::store::StoreError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Shell(#[from] ShellError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
