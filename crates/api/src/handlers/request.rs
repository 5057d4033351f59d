//! Rejection mapping shared by the handlers.
//!
//! axum's extractors answer malformed input with their own status codes and
//! plain-text bodies. Handlers take `Result<Extractor, Rejection>` instead and
//! run it through these helpers so every client error is an [`ApiError`].

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::Json;
use estate_primitives::error::ApiError;
use estate_primitives::validation::{fields_from_pairs, RawFields};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        debug!(error = %rejection.body_text(), "Rejected JSON body");
        ApiError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    })
}

/// A JSON body that must be an object; its members are validated later.
pub fn json_fields(body: Result<Json<Value>, JsonRejection>) -> Result<RawFields, ApiError> {
    match json_body(body)? {
        Value::Object(fields) => Ok(fields),
        _ => Err(ApiError::BadRequest(
            "Request body must be a JSON object".to_string(),
        )),
    }
}

pub fn query_fields(
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<RawFields, ApiError> {
    query
        .map(|Query(pairs)| fields_from_pairs(pairs))
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

pub fn query_params<T: DeserializeOwned>(
    query: Result<Query<T>, QueryRejection>,
) -> Result<T, ApiError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

pub fn property_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    match path {
        Ok(Path(id)) if id > 0 => Ok(id),
        _ => Err(ApiError::BadRequest("Invalid property id".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_objects_become_field_maps() {
        let fields = json_fields(Ok(Json(json!({ "price": "10" })))).unwrap();
        assert_eq!(fields["price"], json!("10"));

        let err = json_fields(Ok(Json(json!([1, 2])))).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn query_pairs_are_string_fields() {
        let mut pairs = HashMap::new();
        pairs.insert("page".to_string(), "2".to_string());

        let fields = query_fields(Ok(Query(pairs))).unwrap();
        assert_eq!(fields["page"], json!("2"));
    }

    #[test]
    fn non_positive_ids_are_rejected() {
        assert_eq!(property_id(Ok(Path(7))).unwrap(), 7);
        assert!(matches!(
            property_id(Ok(Path(0))),
            Err(ApiError::BadRequest(_))
        ));
    }
}
