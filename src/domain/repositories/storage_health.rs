//! Backend liveness probe used by the health endpoint.

use async_trait::async_trait;

use crate::error::AppError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageHealth: Send + Sync {
    /// Short backend name, e.g. `postgres`.
    fn backend(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the backend is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
