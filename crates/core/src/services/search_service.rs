use crate::app_state::AppState;
use estate_primitives::error::ApiError;
use estate_primitives::models::dtos::{Pagination, SearchQuery, SearchResponse};
use estate_primitives::models::entities::Property;
use estate_primitives::models::filter::{
    Bounds, EqualityFilter, FilterClause, Page, PageRequest, PropertyFilter, PropertySort,
    RangeField, TextField,
};
use tracing::debug;

pub struct SearchService;

impl SearchService {
    /// Translates search criteria into filter clauses. Absent criteria add
    /// nothing; each feature becomes its own clause.
    pub fn build_filter(query: &SearchQuery) -> PropertyFilter {
        let mut filter = PropertyFilter::new();

        if let Some(t) = query.property_type {
            filter.push(FilterClause::Equals(EqualityFilter::PropertyType(t)));
        }
        if let Some(p) = query.purchase_type {
            filter.push(FilterClause::Equals(EqualityFilter::Purchase(p)));
        }

        let price = Bounds {
            min: query.min_price,
            max: query.max_price,
        };
        if !price.is_open() {
            filter.push(FilterClause::Range(RangeField::Price, price));
        }

        for (field, value) in [
            (TextField::Location, &query.location),
            (TextField::City, &query.city),
            (TextField::State, &query.state),
        ] {
            if let Some(value) = value {
                filter.push(FilterClause::Contains(field, value.clone()));
            }
        }

        if let Some(n) = query.bedrooms {
            filter.push(FilterClause::Equals(EqualityFilter::Bedrooms(n)));
        }
        if let Some(n) = query.bathrooms {
            filter.push(FilterClause::Equals(EqualityFilter::Bathrooms(n)));
        }

        let area = Bounds {
            min: query.min_area,
            max: query.max_area,
        };
        if !area.is_open() {
            filter.push(FilterClause::Range(RangeField::Area, area));
        }

        for feature in &query.features {
            filter.push(FilterClause::Contains(TextField::Features, feature.clone()));
        }

        filter
    }

    /// Count and page are read concurrently from the same filter.
    pub async fn fetch_page(
        state: &AppState,
        filter: &PropertyFilter,
        sort: PropertySort,
        page: PageRequest,
    ) -> Result<Page<Property>, ApiError> {
        let (total, items) = tokio::try_join!(
            state.properties.count(filter),
            state.properties.find_page(filter, sort, page),
        )?;

        Ok(Page { items, total })
    }

    pub async fn search(state: &AppState, query: &SearchQuery) -> Result<SearchResponse, ApiError> {
        let filter = Self::build_filter(query);
        debug!(clauses = filter.clauses().len(), page = query.page.page, "Searching properties");

        let result = Self::fetch_page(state, &filter, query.sort, query.page).await?;

        Ok(SearchResponse {
            properties: result.items,
            pagination: Pagination {
                total: result.total,
                page: query.page.page,
                limit: query.page.limit,
                total_pages: query.page.total_pages(result.total),
            },
        })
    }
}
