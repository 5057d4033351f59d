use super::{PaymentRepository, PropertyRepository, UserRepository};
use async_trait::async_trait;
use chrono::Utc;
use estate_primitives::error::{ApiError, AuthError};
use estate_primitives::models::dtos::PropertyDraft;
use estate_primitives::models::entities::{
    NewPayment, NewUser, Payment, PaymentStatus, Property, User,
};
use estate_primitives::models::filter::{PageRequest, PropertyFilter, PropertySort};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    properties: Vec<Property>,
    payments: Vec<Payment>,
    users: Vec<User>,
    next_property_id: i64,
    next_payment_id: i64,
}

/// Process-local store implementing every repository trait with the same
/// filtering, ordering and uniqueness rules as the Postgres adapters.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, ApiError> {
        self.tables
            .lock()
            .map_err(|_| ApiError::Internal("In-memory store lock poisoned".into()))
    }

    /// Every stored payment, in insertion order.
    pub fn payments(&self) -> Vec<Payment> {
        self.lock().map(|t| t.payments.clone()).unwrap_or_default()
    }

    /// Every stored listing, soft-deleted ones included.
    pub fn properties(&self) -> Vec<Property> {
        self.lock().map(|t| t.properties.clone()).unwrap_or_default()
    }
}

fn apply_draft(property: &mut Property, draft: PropertyDraft) {
    property.property_type = draft.property_type;
    property.purchase = draft.purchase;
    property.price = draft.price;
    property.bedrooms = draft.bedrooms;
    property.bathrooms = draft.bathrooms;
    property.area = draft.area;
    property.description = draft.description;
    property.location = draft.location;
    property.city = draft.city;
    property.state = draft.state;
    property.zip_code = draft.zip_code;
    property.contact_detail = draft.contact_detail;
    property.features = draft.features;
    property.video = draft.video;
    property.status = draft.status;
}

#[async_trait]
impl PropertyRepository for InMemoryStore {
    async fn create(&self, draft: PropertyDraft, images: Vec<String>) -> Result<Property, ApiError> {
        let mut tables = self.lock()?;
        tables.next_property_id += 1;

        let now = Utc::now();
        let property = Property {
            id: tables.next_property_id,
            property_type: draft.property_type,
            purchase: draft.purchase,
            price: draft.price,
            bedrooms: draft.bedrooms,
            bathrooms: draft.bathrooms,
            area: draft.area,
            description: draft.description,
            location: draft.location,
            city: draft.city,
            state: draft.state,
            zip_code: draft.zip_code,
            contact_detail: draft.contact_detail,
            features: draft.features,
            images,
            video: draft.video,
            status: draft.status,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };

        tables.properties.push(property.clone());
        Ok(property)
    }

    async fn find_active(&self, id: i64) -> Result<Option<Property>, ApiError> {
        Ok(self
            .lock()?
            .properties
            .iter()
            .find(|p| p.id == id && p.is_active())
            .cloned())
    }

    async fn update(
        &self,
        id: i64,
        draft: PropertyDraft,
        images: Option<Vec<String>>,
    ) -> Result<Option<Property>, ApiError> {
        let mut tables = self.lock()?;
        let Some(property) = tables
            .properties
            .iter_mut()
            .find(|p| p.id == id && p.is_active())
        else {
            return Ok(None);
        };

        apply_draft(property, draft);
        if let Some(images) = images {
            property.images = images;
        }
        property.updated_at = Utc::now();

        Ok(Some(property.clone()))
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, ApiError> {
        let mut tables = self.lock()?;
        match tables
            .properties
            .iter_mut()
            .find(|p| p.id == id && p.is_active())
        {
            Some(property) => {
                let now = Utc::now();
                property.deleted_at = Some(now);
                property.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self, filter: &PropertyFilter) -> Result<i64, ApiError> {
        let tables = self.lock()?;
        let total = tables
            .properties
            .iter()
            .filter(|p| p.is_active() && filter.matches(p))
            .count();
        Ok(total as i64)
    }

    async fn find_page(
        &self,
        filter: &PropertyFilter,
        sort: PropertySort,
        page: PageRequest,
    ) -> Result<Vec<Property>, ApiError> {
        let tables = self.lock()?;
        let mut rows: Vec<Property> = tables
            .properties
            .iter()
            .filter(|p| p.is_active() && filter.matches(p))
            .cloned()
            .collect();

        rows.sort_by(|a, b| sort.compare(a, b));

        Ok(rows
            .into_iter()
            .skip(page.offset().max(0) as usize)
            .take(page.limit.max(0) as usize)
            .collect())
    }

    async fn ping(&self) -> Result<(), ApiError> {
        self.lock().map(|_| ())
    }
}

#[async_trait]
impl PaymentRepository for InMemoryStore {
    async fn create(&self, payment: NewPayment) -> Result<Payment, ApiError> {
        let mut tables = self.lock()?;

        if !tables.properties.iter().any(|p| p.id == payment.property_id) {
            return Err(ApiError::NotFound("Property not found".into()));
        }
        if tables.payments.iter().any(|p| p.tx_ref == payment.tx_ref) {
            return Err(ApiError::Internal(format!(
                "Duplicate transaction reference {}",
                payment.tx_ref
            )));
        }

        tables.next_payment_id += 1;
        let now = Utc::now();
        let stored = Payment {
            id: tables.next_payment_id,
            user_id: payment.user_id,
            property_id: payment.property_id,
            amount: payment.amount,
            currency: payment.currency,
            tx_ref: payment.tx_ref,
            status: payment.status,
            created_at: now,
            updated_at: now,
        };

        tables.payments.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_tx_ref(&self, tx_ref: &str) -> Result<Option<Payment>, ApiError> {
        Ok(self
            .lock()?
            .payments
            .iter()
            .find(|p| p.tx_ref == tx_ref)
            .cloned())
    }

    async fn settle(
        &self,
        tx_ref: &str,
        status: PaymentStatus,
    ) -> Result<Option<Payment>, ApiError> {
        let mut tables = self.lock()?;
        match tables
            .payments
            .iter_mut()
            .find(|p| p.tx_ref == tx_ref && p.status == PaymentStatus::Pending)
        {
            Some(payment) => {
                payment.status = status;
                payment.updated_at = Utc::now();
                Ok(Some(payment.clone()))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, ApiError> {
        let mut tables = self.lock()?;

        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(ApiError::Auth(AuthError::DuplicateEmail));
        }

        let stored = User {
            id: Uuid::new_v4(),
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };

        tables.users.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .lock()?
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        Ok(self.lock()?.users.iter().find(|u| u.id == id).cloned())
    }
}
