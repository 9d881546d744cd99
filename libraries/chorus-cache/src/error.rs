/// Cache errors
use thiserror::Error;

/// Cache fault: the cache could not answer
///
/// Never surfaced to API callers. Reads treat it as a miss, writes and
/// invalidations log it.
#[derive(Error, Debug)]
pub enum CacheError {
    /// No connection could be obtained
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected or failed the command
    #[error("Cache backend error: {0}")]
    Backend(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<deadpool_redis::PoolError> for CacheError {
    fn from(err: deadpool_redis::PoolError) -> Self {
        Self::Unavailable(err.to_string())
    }
}
