pub mod sqlite_room_repo;
pub mod sqlite_reservation_repo;
pub mod sqlite_restriction_repo;
pub mod sqlite_user_repo;

pub mod postgres_room_repo;
pub mod postgres_reservation_repo;
pub mod postgres_restriction_repo;
pub mod postgres_user_repo;

use crate::error::AppError;
use std::future::Future;
use std::time::Duration;

/// Upper bound for every storage call issued by a request.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(3);

/// Runs a query under [`QUERY_TIMEOUT`]. An elapsed timeout is just another storage error.
pub(crate) async fn bounded<T, F>(query: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(QUERY_TIMEOUT, query).await {
        Ok(result) => result.map_err(AppError::Database),
        Err(_) => Err(AppError::Timeout(QUERY_TIMEOUT)),
    }
}
