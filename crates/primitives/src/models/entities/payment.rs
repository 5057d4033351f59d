use crate::models::entities::enum_types::PaymentStatus;
use chrono::{DateTime, Utc};
use diesel::{Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub const PAYMENT_CURRENCY: &str = "ETB";

#[derive(
    Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Associations, Serialize, Deserialize, ToSchema,
)]
#[diesel(table_name = crate::schema::payments)]
#[diesel(belongs_to(crate::models::entities::property::Property))]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    pub user_id: Uuid,
    pub property_id: i64,
    /// Price of the property when the payment was initiated.
    pub amount: f64,
    pub currency: String,
    pub tx_ref: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::payments)]
pub struct NewPayment {
    pub user_id: Uuid,
    pub property_id: i64,
    pub amount: f64,
    pub currency: String,
    pub tx_ref: String,
    pub status: PaymentStatus,
}
