use serde::{Deserialize, Serialize};

use crate::domain::CategoryId;

/// Body of both the `PUT {resource}/{id}` and the `POST {resource}` requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category_id: CategoryId,
    pub images: Vec<String>,
}

/// Splits a comma-separated image list, trimming each entry and dropping empty ones.
pub fn parse_images(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|image| !image.is_empty())
        .map(str::to_string)
        .collect()
}
