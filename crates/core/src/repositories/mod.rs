pub mod in_memory;
pub mod payment_repository;
pub mod property_repository;
pub mod user_repository;

pub use in_memory::InMemoryStore;
pub use payment_repository::{PaymentRepository, PgPaymentRepository};
pub use property_repository::{PgPropertyRepository, PropertyRepository};
pub use user_repository::{PgUserRepository, UserRepository};

use diesel::r2d2::{self, ConnectionManager};
use diesel::PgConnection;
use estate_primitives::error::ApiError;
use tracing::error;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

/// Runs a diesel closure on the blocking pool with a pooled connection.
pub(crate) async fn with_conn<T, F>(pool: &DbPool, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&mut PgConnection) -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();

    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get().map_err(|e| {
            error!(error = %e, "Failed to acquire database connection");
            ApiError::from(e)
        })?;
        f(&mut conn)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Database task failed: {}", e)))?
}
