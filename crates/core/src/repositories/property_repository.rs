use super::{with_conn, DbPool};
use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::Pg;
use diesel::prelude::*;
use estate_primitives::error::ApiError;
use estate_primitives::models::dtos::PropertyDraft;
use estate_primitives::models::entities::{NewProperty, Property, PropertyChangeset};
use estate_primitives::models::filter::{
    EqualityFilter, FilterClause, PageRequest, PropertyFilter, PropertySort, RangeField,
    SortDirection, SortField, TextField,
};
use estate_primitives::schema::properties;
use estate_primitives::utility::escape_like;

/// Storage of listings. Every read excludes soft-deleted rows.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn create(&self, draft: PropertyDraft, images: Vec<String>) -> Result<Property, ApiError>;

    async fn find_active(&self, id: i64) -> Result<Option<Property>, ApiError>;

    /// Replaces the listing's columns; `images: None` keeps the stored ones.
    /// Returns `None` when the listing is missing or deleted.
    async fn update(
        &self,
        id: i64,
        draft: PropertyDraft,
        images: Option<Vec<String>>,
    ) -> Result<Option<Property>, ApiError>;

    /// Returns `false` when there was no active listing to delete.
    async fn soft_delete(&self, id: i64) -> Result<bool, ApiError>;

    async fn count(&self, filter: &PropertyFilter) -> Result<i64, ApiError>;

    async fn find_page(
        &self,
        filter: &PropertyFilter,
        sort: PropertySort,
        page: PageRequest,
    ) -> Result<Vec<Property>, ApiError>;

    async fn ping(&self) -> Result<(), ApiError>;
}

#[derive(Clone)]
pub struct PgPropertyRepository {
    pool: DbPool,
}

impl PgPropertyRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

macro_rules! order_by_direction {
    ($query:expr, $column:expr, $direction:expr) => {
        match $direction {
            SortDirection::Asc => $query.order_by($column.asc()),
            SortDirection::Desc => $query.order_by($column.desc()),
        }
    };
}

fn filtered(filter: &PropertyFilter) -> properties::BoxedQuery<'static, Pg> {
    let mut query = properties::table
        .filter(properties::deleted_at.is_null())
        .into_boxed();

    for clause in filter.clauses() {
        query = match clause {
            FilterClause::Equals(eq) => match *eq {
                EqualityFilter::PropertyType(t) => query.filter(properties::property_type.eq(t)),
                EqualityFilter::Purchase(p) => query.filter(properties::purchase.eq(p)),
                EqualityFilter::Bedrooms(n) => query.filter(properties::bedrooms.eq(n)),
                EqualityFilter::Bathrooms(n) => query.filter(properties::bathrooms.eq(n)),
            },
            FilterClause::Range(RangeField::Price, bounds) => {
                if let Some(min) = bounds.min {
                    query = query.filter(properties::price.ge(min));
                }
                if let Some(max) = bounds.max {
                    query = query.filter(properties::price.le(max));
                }
                query
            }
            FilterClause::Range(RangeField::Area, bounds) => {
                if let Some(min) = bounds.min {
                    query = query.filter(properties::area.ge(min));
                }
                if let Some(max) = bounds.max {
                    query = query.filter(properties::area.le(max));
                }
                query
            }
            FilterClause::Contains(field, needle) => {
                let pattern = format!("%{}%", escape_like(needle));
                match field {
                    TextField::Location => query.filter(properties::location.ilike(pattern)),
                    TextField::City => query.filter(properties::city.ilike(pattern)),
                    TextField::State => query.filter(properties::state.ilike(pattern)),
                    TextField::Features => query.filter(properties::features.ilike(pattern)),
                }
            }
        };
    }

    query
}

fn sorted(
    query: properties::BoxedQuery<'static, Pg>,
    sort: PropertySort,
) -> properties::BoxedQuery<'static, Pg> {
    let query = match sort.field {
        SortField::CreatedAt => order_by_direction!(query, properties::created_at, sort.direction),
        SortField::UpdatedAt => order_by_direction!(query, properties::updated_at, sort.direction),
        SortField::Price => order_by_direction!(query, properties::price, sort.direction),
        SortField::Bedrooms => order_by_direction!(query, properties::bedrooms, sort.direction),
        SortField::Bathrooms => order_by_direction!(query, properties::bathrooms, sort.direction),
        SortField::Area => order_by_direction!(query, properties::area, sort.direction),
    };

    query.then_order_by(properties::id.asc())
}

#[async_trait]
impl PropertyRepository for PgPropertyRepository {
    async fn create(&self, draft: PropertyDraft, images: Vec<String>) -> Result<Property, ApiError> {
        with_conn(&self.pool, move |conn| {
            let new_property = NewProperty {
                property_type: draft.property_type,
                purchase: draft.purchase,
                price: draft.price,
                bedrooms: draft.bedrooms,
                bathrooms: draft.bathrooms,
                area: draft.area,
                description: &draft.description,
                location: &draft.location,
                city: &draft.city,
                state: &draft.state,
                zip_code: &draft.zip_code,
                contact_detail: &draft.contact_detail,
                features: draft.features.as_deref(),
                images: &images,
                video: draft.video.as_deref(),
                status: &draft.status,
            };

            diesel::insert_into(properties::table)
                .values(&new_property)
                .get_result::<Property>(conn)
                .map_err(ApiError::from)
        })
        .await
    }

    async fn find_active(&self, id: i64) -> Result<Option<Property>, ApiError> {
        with_conn(&self.pool, move |conn| {
            properties::table
                .filter(properties::id.eq(id))
                .filter(properties::deleted_at.is_null())
                .first::<Property>(conn)
                .optional()
                .map_err(ApiError::from)
        })
        .await
    }

    async fn update(
        &self,
        id: i64,
        draft: PropertyDraft,
        images: Option<Vec<String>>,
    ) -> Result<Option<Property>, ApiError> {
        with_conn(&self.pool, move |conn| {
            let changeset = PropertyChangeset {
                property_type: draft.property_type,
                purchase: draft.purchase,
                price: draft.price,
                bedrooms: draft.bedrooms,
                bathrooms: draft.bathrooms,
                area: draft.area,
                description: &draft.description,
                location: &draft.location,
                city: &draft.city,
                state: &draft.state,
                zip_code: &draft.zip_code,
                contact_detail: &draft.contact_detail,
                features: draft.features.as_deref(),
                video: draft.video.as_deref(),
                status: &draft.status,
                updated_at: Utc::now(),
            };

            let target = properties::table
                .filter(properties::id.eq(id))
                .filter(properties::deleted_at.is_null());

            let updated = match images {
                Some(images) => diesel::update(target)
                    .set((&changeset, properties::images.eq(images)))
                    .get_result::<Property>(conn),
                None => diesel::update(target)
                    .set(&changeset)
                    .get_result::<Property>(conn),
            };

            updated.optional().map_err(ApiError::from)
        })
        .await
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, ApiError> {
        with_conn(&self.pool, move |conn| {
            let now = Utc::now();
            let affected = diesel::update(
                properties::table
                    .filter(properties::id.eq(id))
                    .filter(properties::deleted_at.is_null()),
            )
            .set((
                properties::deleted_at.eq(Some(now)),
                properties::updated_at.eq(now),
            ))
            .execute(conn)?;

            Ok(affected > 0)
        })
        .await
    }

    async fn count(&self, filter: &PropertyFilter) -> Result<i64, ApiError> {
        let filter = filter.clone();
        with_conn(&self.pool, move |conn| {
            filtered(&filter)
                .count()
                .get_result::<i64>(conn)
                .map_err(ApiError::from)
        })
        .await
    }

    async fn find_page(
        &self,
        filter: &PropertyFilter,
        sort: PropertySort,
        page: PageRequest,
    ) -> Result<Vec<Property>, ApiError> {
        let filter = filter.clone();
        with_conn(&self.pool, move |conn| {
            sorted(filtered(&filter), sort)
                .limit(page.limit)
                .offset(page.offset())
                .load::<Property>(conn)
                .map_err(ApiError::from)
        })
        .await
    }

    async fn ping(&self) -> Result<(), ApiError> {
        with_conn(&self.pool, |conn| {
            diesel::sql_query("SELECT 1").execute(conn)?;
            Ok(())
        })
        .await
    }
}
