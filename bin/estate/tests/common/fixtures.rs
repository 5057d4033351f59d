use super::{png, text_form};
use axum_test::multipart::MultipartForm;
use serde_json::{json, Value};

pub const DESCRIPTION: &str =
    "Spacious family house with a large garden, two parking spaces and a quiet street";

pub fn property_fields(overrides: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = [
        ("propertyType", "HOUSE".to_string()),
        ("purchase", "SALE".to_string()),
        ("price", "250000".to_string()),
        ("bedrooms", "3".to_string()),
        ("bathrooms", "2".to_string()),
        ("area", "180.5".to_string()),
        ("description", DESCRIPTION.to_string()),
        ("location", "Bole Atlas".to_string()),
        ("city", "Addis Ababa".to_string()),
        ("state", "Addis Ababa".to_string()),
        ("zipCode", "1000".to_string()),
        ("contactDetail", "+251911223344".to_string()),
        ("features", "parking, garden".to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    for (key, value) in overrides {
        match fields.iter_mut().find(|(k, _)| k.as_str() == *key) {
            Some(entry) => entry.1 = value.to_string(),
            None => fields.push((key.to_string(), value.to_string())),
        }
    }
    fields
}

/// A creation form with `images` image parts.
pub fn property_form(overrides: &[(&str, &str)], images: usize) -> MultipartForm {
    (0..images).fold(text_form(&property_fields(overrides)), |form, i| {
        form.add_part("images", png(&format!("photo_{i}.png")))
    })
}

pub fn update_body(price: f64) -> Value {
    json!({
        "propertyType": "APARTMENT",
        "purchase": "RENT",
        "price": price,
        "bedrooms": 2,
        "bathrooms": "1",
        "area": 75,
        "description": DESCRIPTION,
        "location": "Kazanchis",
        "city": "Addis Ababa",
        "state": "Addis Ababa",
        "zipCode": "1000",
        "contactDetail": "+251911223344",
        "features": "balcony",
        "status": "RENTED"
    })
}

pub fn chapa_checkout(checkout_url: &str) -> Value {
    json!({
        "message": "Hosted Link",
        "status": "success",
        "data": { "checkout_url": checkout_url }
    })
}

pub fn chapa_verification(status: &str, amount: f64) -> Value {
    json!({
        "message": "Payment details",
        "status": "success",
        "data": {
            "status": status,
            "amount": amount,
            "currency": "ETB"
        }
    })
}
