use axum::extract::multipart::{Field, MultipartError};
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Extension, Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use estate_core::clients::UploadedFile;
use estate_core::services::PropertyService;
use estate_core::{AppState, AuthUser};
use estate_primitives::error::{ApiError, ApiErrorResponse};
use estate_primitives::models::dtos::PropertyForm;
use estate_primitives::models::entities::Property;
use estate_primitives::validation::RawFields;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

const IMAGE_FIELDS: [&str; 2] = ["images", "images[]"];

#[utoipa::path(
    post,
    path = "/api/property",
    tag = "Properties",
    summary = "Create a listing",
    description = "Accepts a multipart form. Text parts carry the listing fields and one to five \
                   image files are sent under `images` (or `images[]`). Nothing is stored unless \
                   the whole form is valid.",
    request_body(content = PropertyForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Listing created", body = Property),
        (status = 400, description = "Invalid form or uploads", body = ApiErrorResponse),
        (status = 401, description = "Unauthorized", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse),
    ),
    security(("bearerAuth" = [])),
)]
pub async fn create_property(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Property>), ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let mut fields = RawFields::new();
    let mut uploads = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if IMAGE_FIELDS.contains(&name.as_str()) {
            uploads.push(read_upload(field).await?);
        } else {
            let text = field.text().await.map_err(malformed)?;
            fields.insert(name, Value::String(text));
        }
    }

    debug!(fields = fields.len(), uploads = uploads.len(), "Parsed property form");

    let property = PropertyService::create(&state, &user, &fields, uploads).await?;
    Ok((StatusCode::CREATED, Json(property)))
}

async fn read_upload(field: Field<'_>) -> Result<UploadedFile, ApiError> {
    let file_name = field.file_name().map(str::to_string);
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field.bytes().await.map_err(malformed)?;

    Ok(UploadedFile {
        file_name,
        content_type,
        bytes,
    })
}

fn malformed(err: MultipartError) -> ApiError {
    ApiError::BadRequest(format!("Malformed multipart body: {}", err.body_text()))
}
