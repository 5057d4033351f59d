use crate::models::entities::{Property, PropertyType, PurchaseType};
use crate::models::filter::{
    PageRequest, PropertySort, SortDirection, SortField, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT,
};
use crate::validation::{FieldReader, RawFields};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::ValidationErrors;

/// Reads `page`/`limit`, rejecting values outside `page >= 1` and
/// `1 <= limit <= MAX_LIMIT`, and pages whose row offset does not fit an `i64`.
pub fn read_page(reader: &mut FieldReader<'_>) -> PageRequest {
    let page = reader.optional_integer("page").unwrap_or(DEFAULT_PAGE);
    let limit = reader.optional_integer("limit").unwrap_or(DEFAULT_LIMIT);

    let offset_fits = page
        .checked_sub(1)
        .and_then(|skipped| skipped.checked_mul(limit.clamp(1, MAX_LIMIT)))
        .is_some();
    reader.ensure(
        page >= 1 && offset_fits,
        "page",
        "range",
        "page must be 1 or more and within the result window",
    );
    reader.ensure(
        (1..=MAX_LIMIT).contains(&limit),
        "limit",
        "range",
        format!("limit must be between 1 and {}", MAX_LIMIT),
    );

    PageRequest { page, limit }
}

pub fn page_from_fields(fields: &RawFields) -> Result<PageRequest, ValidationErrors> {
    let mut reader = FieldReader::new(fields);
    let page = read_page(&mut reader);
    reader.finish()?;
    Ok(page)
}

/// Typed search criteria parsed from the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub property_type: Option<PropertyType>,
    pub purchase_type: Option<PurchaseType>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    /// Comma-separated input, split and trimmed; empty entries dropped.
    pub features: Vec<String>,
    pub page: PageRequest,
    pub sort: PropertySort,
}

impl SearchQuery {
    pub fn from_fields(fields: &RawFields) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(fields);

        let query = Self {
            property_type: reader.optional_choice("propertyType"),
            purchase_type: reader.optional_choice("purchaseType"),
            min_price: reader.optional_number("minPrice"),
            max_price: reader.optional_number("maxPrice"),
            location: reader.optional_string("location"),
            city: reader.optional_string("city"),
            state: reader.optional_string("state"),
            bedrooms: reader.optional_count("bedrooms"),
            bathrooms: reader.optional_count("bathrooms"),
            min_area: reader.optional_number("minArea"),
            max_area: reader.optional_number("maxArea"),
            features: reader
                .optional_string("features")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|f| !f.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            page: read_page(&mut reader),
            sort: PropertySort::new(
                reader.optional_choice::<SortField>("sortBy").unwrap_or_default(),
                reader
                    .optional_choice::<SortDirection>("sortOrder")
                    .unwrap_or_default(),
            ),
        };

        reader.finish()?;
        Ok(query)
    }
}

/// Query parameters of `GET /api/properties/search`; documentation only.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub property_type: Option<PropertyType>,
    pub purchase_type: Option<PurchaseType>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    /// Comma separated; every entry must match.
    #[param(example = "parking,garden")]
    pub features: Option<String>,
    #[param(minimum = 1, default = 1)]
    pub page: Option<i64>,
    #[param(minimum = 1, maximum = 100, default = 10)]
    pub limit: Option<i64>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortDirection>,
}

/// Query parameters of `GET /api/properties`; documentation only.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    #[param(minimum = 1, default = 1)]
    pub page: Option<i64>,
    #[param(minimum = 1, maximum = 100, default = 10)]
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub properties: Vec<Property>,
    pub pagination: Pagination,
}
