//! Typed property search filters.
//!
//! A [`PropertyFilter`] is an ordered list of clauses. The same value is
//! rendered into SQL by the diesel repository and evaluated directly by the
//! in-memory store, so both back ends agree on what a search returns.

use crate::models::entities::{Property, PropertyType, PurchaseType};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{Display, EnumString};
use utoipa::ToSchema;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EqualityFilter {
    PropertyType(PropertyType),
    Purchase(PurchaseType),
    Bedrooms(i32),
    Bathrooms(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeField {
    Price,
    Area,
}

/// Inclusive bounds; either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bounds {
    pub fn is_open(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Location,
    City,
    State,
    Features,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    Equals(EqualityFilter),
    Range(RangeField, Bounds),
    /// Case-insensitive substring match; the needle is matched literally.
    Contains(TextField, String),
}

impl FilterClause {
    pub fn matches(&self, property: &Property) -> bool {
        match self {
            FilterClause::Equals(eq) => match *eq {
                EqualityFilter::PropertyType(t) => property.property_type == t,
                EqualityFilter::Purchase(p) => property.purchase == p,
                EqualityFilter::Bedrooms(n) => property.bedrooms == Some(n),
                EqualityFilter::Bathrooms(n) => property.bathrooms == Some(n),
            },
            FilterClause::Range(field, bounds) => {
                let value = match field {
                    RangeField::Price => Some(property.price),
                    RangeField::Area => property.area,
                };
                // NULL never satisfies a comparison in SQL
                value.is_some_and(|v| bounds.contains(v))
            }
            FilterClause::Contains(field, needle) => {
                let haystack = match field {
                    TextField::Location => Some(property.location.as_str()),
                    TextField::City => Some(property.city.as_str()),
                    TextField::State => Some(property.state.as_str()),
                    TextField::Features => property.features.as_deref(),
                };
                haystack.is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFilter {
    clauses: Vec<FilterClause>,
}

impl PropertyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, clause: FilterClause) {
        self.clauses.push(clause);
    }

    pub fn with(mut self, clause: FilterClause) -> Self {
        self.push(clause);
        self
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// All clauses must hold. Soft-deletion is not considered here.
    pub fn matches(&self, property: &Property) -> bool {
        self.clauses.iter().all(|c| c.matches(property))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize, ToSchema)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Price,
    Bedrooms,
    Bathrooms,
    Area,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize, ToSchema)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PropertySort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl PropertySort {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Orders the way Postgres does: NULL sorts as the greatest value, and
    /// ties fall back to ascending id.
    pub fn compare(&self, a: &Property, b: &Property) -> Ordering {
        let primary = match self.field {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortField::Price => a.price.total_cmp(&b.price),
            SortField::Bedrooms => nulls_last(a.bedrooms, b.bedrooms, |x, y| x.cmp(&y)),
            SortField::Bathrooms => nulls_last(a.bathrooms, b.bathrooms, |x, y| x.cmp(&y)),
            SortField::Area => nulls_last(a.area, b.area, |x, y| x.total_cmp(&y)),
        };

        let primary = match self.direction {
            SortDirection::Asc => primary,
            SortDirection::Desc => primary.reverse(),
        };

        primary.then_with(|| a.id.cmp(&b.id))
    }
}

fn nulls_last<T: Copy>(a: Option<T>, b: Option<T>, cmp: impl Fn(T, T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// A validated page window: `page >= 1`, `1 <= limit <= MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            0
        } else {
            (total + self.limit - 1) / self.limit
        }
    }
}

/// One page of rows plus the count of all rows matching the same filter.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}
