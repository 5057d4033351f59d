use crate::models::entities::{Property, PropertyType, PurchaseType};
use crate::validation::{FieldReader, RawFields};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidationErrors;

pub const MAX_IMAGES: usize = 5;
pub const DEFAULT_STATUS: &str = "AVAILABLE";

/// Normalised listing attributes shared by creation and full replacement.
/// Media references are carried separately.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDraft {
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
    pub video: Option<String>,
    pub status: String,
}

impl PropertyDraft {
    fn read(reader: &mut FieldReader<'_>) -> Option<Self> {
        let property_type = reader.required_choice::<PropertyType>("propertyType");
        let purchase = reader.required_choice::<PurchaseType>("purchase");
        let price = reader.required_number("price");
        let bedrooms = reader.optional_count("bedrooms");
        let bathrooms = reader.optional_count("bathrooms");
        let area = reader.optional_number("area");
        let description = reader.required_string("description");
        let location = reader.required_string("location");
        let city = reader.required_string("city");
        let state = reader.required_string("state");
        let zip_code = reader.required_string("zipCode");
        let contact_detail = reader.required_string("contactDetail");
        let features = reader.optional_string("features");
        let video = reader.optional_string("video");
        let status = reader.optional_string("status");

        if let Some(price) = price {
            reader.ensure(price >= 0.0, "price", "range", "price must be zero or more");
        }
        if let Some(area) = area {
            reader.ensure(area >= 0.0, "area", "range", "area must be zero or more");
        }

        if reader.has_errors() {
            return None;
        }

        Some(Self {
            property_type: property_type?,
            purchase: purchase?,
            price: price?,
            bedrooms,
            bathrooms,
            area,
            description: description?,
            location: location?,
            city: city?,
            state: state?,
            zip_code: zip_code?,
            contact_detail: contact_detail?,
            features,
            video,
            status: status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        })
    }

    /// Validates a multipart creation form. `image_count` is the number of
    /// uploaded files; they are checked here so that nothing is stored for a
    /// form that fails.
    pub fn from_form(fields: &RawFields, image_count: usize) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(fields);
        let draft = Self::read(&mut reader);

        if image_count == 0 {
            reader.reject("images", "required", "At least one image is required");
        } else if image_count > MAX_IMAGES {
            reader.reject(
                "images",
                "too_many",
                format!("At most {} images are allowed", MAX_IMAGES),
            );
        }

        reader.finish()?;
        draft.ok_or_else(ValidationErrors::new)
    }
}

/// Full replacement of a listing. `images`, when present, replaces the stored
/// references; when absent they are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyUpdate {
    pub draft: PropertyDraft,
    pub images: Option<Vec<String>>,
}

impl PropertyUpdate {
    pub fn from_fields(fields: &RawFields) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(fields);
        let draft = PropertyDraft::read(&mut reader);

        let images = match reader.optional_string_list("images") {
            Some(list) if list.is_empty() => {
                reader.reject("images", "required", "At least one image is required");
                None
            }
            Some(list) if list.len() > MAX_IMAGES => {
                reader.reject(
                    "images",
                    "too_many",
                    format!("At most {} images are allowed", MAX_IMAGES),
                );
                None
            }
            other => other,
        };

        reader.finish()?;
        Ok(Self {
            draft: draft.ok_or_else(ValidationErrors::new)?,
            images,
        })
    }
}

/// Multipart body accepted by `POST /api/property`; documentation only.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct PropertyForm {
    #[schema(example = "APARTMENT")]
    pub property_type: PropertyType,
    #[schema(example = "RENT")]
    pub purchase: PurchaseType,
    #[schema(example = 15000.0)]
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
    #[schema(example = "parking, garden")]
    pub features: Option<String>,
    pub video: Option<String>,
    #[schema(example = "AVAILABLE")]
    pub status: Option<String>,
    /// One to five image files (`images` or `images[]`).
    #[schema(value_type = Vec<String>, format = Binary)]
    pub images: Vec<Vec<u8>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListResponse {
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub properties: Vec<Property>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
