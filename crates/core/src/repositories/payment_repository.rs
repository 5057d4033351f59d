use super::{with_conn, DbPool};
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use estate_primitives::error::ApiError;
use estate_primitives::models::entities::{NewPayment, Payment, PaymentStatus};
use estate_primitives::schema::payments;
use tracing::error;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: NewPayment) -> Result<Payment, ApiError>;

    async fn find_by_tx_ref(&self, tx_ref: &str) -> Result<Option<Payment>, ApiError>;

    /// Moves a `Pending` payment to `status`. Returns `None` when the payment
    /// is unknown or has already been settled.
    async fn settle(&self, tx_ref: &str, status: PaymentStatus)
        -> Result<Option<Payment>, ApiError>;
}

#[derive(Clone)]
pub struct PgPaymentRepository {
    pool: DbPool,
}

impl PgPaymentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    async fn create(&self, payment: NewPayment) -> Result<Payment, ApiError> {
        with_conn(&self.pool, move |conn| {
            diesel::insert_into(payments::table)
                .values(&payment)
                .get_result::<Payment>(conn)
                .map_err(|e| {
                    error!(error = %e, tx_ref = %payment.tx_ref, "Failed to record payment");
                    ApiError::from(e)
                })
        })
        .await
    }

    async fn find_by_tx_ref(&self, tx_ref: &str) -> Result<Option<Payment>, ApiError> {
        let tx_ref = tx_ref.to_string();
        with_conn(&self.pool, move |conn| {
            payments::table
                .filter(payments::tx_ref.eq(tx_ref))
                .first::<Payment>(conn)
                .optional()
                .map_err(ApiError::from)
        })
        .await
    }

    async fn settle(
        &self,
        tx_ref: &str,
        status: PaymentStatus,
    ) -> Result<Option<Payment>, ApiError> {
        let tx_ref = tx_ref.to_string();
        with_conn(&self.pool, move |conn| {
            diesel::update(
                payments::table
                    .filter(payments::tx_ref.eq(tx_ref))
                    .filter(payments::status.eq(PaymentStatus::Pending)),
            )
            .set((
                payments::status.eq(status),
                payments::updated_at.eq(Utc::now()),
            ))
            .get_result::<Payment>(conn)
            .optional()
            .map_err(ApiError::from)
        })
        .await
    }
}
