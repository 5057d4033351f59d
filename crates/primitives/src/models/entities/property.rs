use crate::models::entities::enum_types::{PropertyType, PurchaseType};
use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::schema::properties)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: i64,
    pub property_type: PropertyType,
    pub purchase: PurchaseType,
    pub price: f64,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area: Option<f64>,
    pub description: String,
    pub location: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub contact_detail: String,
    pub features: Option<String>,
    pub images: Vec<String>,
    pub video: Option<String>,
    pub status: String,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::properties)]
pub struct NewProperty<'a> {
    pub property_type: PropertyType,
    pub purchase: PurchaseType,
    pub price: f64,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area: Option<f64>,
    pub description: &'a str,
    pub location: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub zip_code: &'a str,
    pub contact_detail: &'a str,
    pub features: Option<&'a str>,
    pub images: &'a [String],
    pub video: Option<&'a str>,
    pub status: &'a str,
}

/// Full replacement of a listing's editable columns; `None` clears a column.
/// Images are set separately since an update may keep the stored ones.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::properties)]
#[diesel(treat_none_as_null = true)]
pub struct PropertyChangeset<'a> {
    pub property_type: PropertyType,
    pub purchase: PurchaseType,
    pub price: f64,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area: Option<f64>,
    pub description: &'a str,
    pub location: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub zip_code: &'a str,
    pub contact_detail: &'a str,
    pub features: Option<&'a str>,
    pub video: Option<&'a str>,
    pub status: &'a str,
    pub updated_at: DateTime<Utc>,
}
