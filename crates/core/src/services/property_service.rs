use crate::app_state::AppState;
use crate::clients::UploadedFile;
use crate::security::AuthUser;
use crate::services::search_service::SearchService;
use estate_primitives::error::ApiError;
use estate_primitives::models::dtos::{
    MessageResponse, PropertyDraft, PropertyListResponse, PropertyUpdate,
};
use estate_primitives::models::entities::Property;
use estate_primitives::models::filter::{PageRequest, PropertyFilter, PropertySort};
use estate_primitives::validation::{field_error, RawFields};
use tracing::{info, warn};
use validator::ValidationErrors;

pub struct PropertyService;

impl PropertyService {
    pub async fn list(state: &AppState, page: PageRequest) -> Result<PropertyListResponse, ApiError> {
        let result =
            SearchService::fetch_page(state, &PropertyFilter::new(), PropertySort::default(), page)
                .await?;

        Ok(PropertyListResponse {
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages(result.total),
            total_items: result.total,
            properties: result.items,
        })
    }

    pub async fn get(state: &AppState, id: i64) -> Result<Property, ApiError> {
        state
            .properties
            .find_active(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Property not found".into()))
    }

    /// Validates the form and every upload before anything is written. Stored
    /// files are removed again if the row cannot be inserted.
    pub async fn create(
        state: &AppState,
        user: &AuthUser,
        fields: &RawFields,
        uploads: Vec<UploadedFile>,
    ) -> Result<Property, ApiError> {
        let draft = PropertyDraft::from_form(fields, uploads.len())?;

        if let Some(bad) = uploads.iter().find(|f| !f.is_image()) {
            let mut errors = ValidationErrors::new();
            errors.add(
                "images",
                field_error(
                    "invalid_type",
                    format!(
                        "{} is not an image",
                        bad.file_name.as_deref().unwrap_or("upload")
                    ),
                ),
            );
            return Err(errors.into());
        }

        let images = Self::store_uploads(state, &uploads).await?;

        match state.properties.create(draft, images.clone()).await {
            Ok(property) => {
                info!(
                    property_id = property.id,
                    user_id = %user.id,
                    images = property.images.len(),
                    "Property created"
                );
                Ok(property)
            }
            Err(e) => {
                Self::discard_uploads(state, &images).await;
                Err(e)
            }
        }
    }

    pub async fn update(
        state: &AppState,
        user: &AuthUser,
        id: i64,
        fields: &RawFields,
    ) -> Result<Property, ApiError> {
        // a missing listing answers 404 before the body is looked at
        Self::get(state, id).await?;

        let update = PropertyUpdate::from_fields(fields)?;

        let property = state
            .properties
            .update(id, update.draft, update.images)
            .await?
            .ok_or_else(|| ApiError::NotFound("Property not found".into()))?;

        info!(property_id = id, user_id = %user.id, "Property updated");
        Ok(property)
    }

    pub async fn delete(state: &AppState, user: &AuthUser, id: i64) -> Result<MessageResponse, ApiError> {
        if !state.properties.soft_delete(id).await? {
            return Err(ApiError::NotFound("Property not found".into()));
        }

        info!(property_id = id, user_id = %user.id, "Property deleted");
        Ok(MessageResponse::new("Deleted successfully"))
    }

    async fn store_uploads(state: &AppState, uploads: &[UploadedFile]) -> Result<Vec<String>, ApiError> {
        let mut stored = Vec::with_capacity(uploads.len());

        for file in uploads {
            match state.media.store(file).await {
                Ok(reference) => stored.push(reference),
                Err(e) => {
                    Self::discard_uploads(state, &stored).await;
                    return Err(e);
                }
            }
        }

        Ok(stored)
    }

    async fn discard_uploads(state: &AppState, references: &[String]) {
        for reference in references {
            if let Err(e) = state.media.remove(reference).await {
                warn!(error = %e, reference = %reference, "Failed to discard upload");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{seed_property, test_state};
    use axum::body::Bytes;
    use estate_primitives::models::entities::UserRole;
    use estate_primitives::validation::fields_from_pairs;
    use uuid::Uuid;

    fn user() -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            email: "agent@example.com".into(),
            role: UserRole::User,
        }
    }

    fn form() -> RawFields {
        fields_from_pairs([
            ("propertyType", "HOUSE"),
            ("purchase", "SALE"),
            ("price", "2500000"),
            ("description", "Villa"),
            ("location", "Old Airport"),
            ("city", "Addis Ababa"),
            ("state", "Addis Ababa"),
            ("zipCode", "1000"),
            ("contactDetail", "+251911000000"),
        ])
    }

    fn image(name: &str, content_type: &str) -> UploadedFile {
        UploadedFile {
            file_name: Some(name.into()),
            content_type: content_type.into(),
            bytes: Bytes::from_static(b"data"),
        }
    }

    #[tokio::test]
    async fn create_stores_images_in_upload_order() {
        let (state, _store, dir) = test_state();

        let property = PropertyService::create(
            &state,
            &user(),
            &form(),
            vec![image("a.jpg", "image/jpeg"), image("b.png", "image/png")],
        )
        .await
        .unwrap();

        assert_eq!(property.images.len(), 2);
        assert!(property.images[0].ends_with(".jpg"));
        assert!(property.images[1].ends_with(".png"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[tokio::test]
    async fn invalid_form_stores_nothing() {
        let (state, store, dir) = test_state();
        let mut fields = form();
        fields.remove("price");

        let err = PropertyService::create(&state, &user(), &fields, vec![image("a.jpg", "image/jpeg")])
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
        assert!(store.properties().is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn non_image_uploads_are_rejected() {
        let (state, store, _dir) = test_state();

        let err = PropertyService::create(
            &state,
            &user(),
            &form(),
            vec![image("a.jpg", "image/jpeg"), image("notes.pdf", "application/pdf")],
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
        assert!(store.properties().is_empty());
    }

    #[tokio::test]
    async fn deleted_listing_is_gone_for_every_operation() {
        let (state, _store, _dir) = test_state();
        let property = seed_property(&state, 1000.0).await;

        PropertyService::delete(&state, &user(), property.id).await.unwrap();

        assert!(matches!(
            PropertyService::get(&state, property.id).await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            PropertyService::delete(&state, &user(), property.id).await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            PropertyService::update(&state, &user(), property.id, &form()).await,
            Err(ApiError::NotFound(_))
        ));

        let list = PropertyService::list(&state, PageRequest::default()).await.unwrap();
        assert_eq!(list.total_items, 0);
        assert_eq!(list.total_pages, 0);
    }

    #[tokio::test]
    async fn update_of_missing_listing_is_not_found_even_with_bad_fields() {
        let (state, _store, _dir) = test_state();
        let fields = fields_from_pairs([("price", "-1"), ("propertyType", "CASTLE")]);

        let err = PropertyService::update(&state, &user(), 404, &fields)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
