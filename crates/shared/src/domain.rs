use serde::{Deserialize, Deserializer, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(ProductId);
id_newtype!(CategoryId);

/// Category id used by the detail form when a product has no category.
pub const FALLBACK_CATEGORY_ID: CategoryId = CategoryId(1);

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// One catalog item as returned by the remote endpoint.
///
/// Fields the server sends beyond these (slug, timestamps, category image) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
}

impl Product {
    pub fn category_name(&self) -> &str {
        self.category
            .as_ref()
            .map(|category| category.name.as_str())
            .unwrap_or_default()
    }

    pub fn category_id(&self) -> Option<CategoryId> {
        self.category.as_ref().map(|category| category.id)
    }

    pub fn first_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Title,
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_server_product_and_ignores_extra_fields() {
        let raw = r#"{
            "id": 7,
            "title": "Classic Tee",
            "slug": "classic-tee",
            "price": 25,
            "description": "Soft cotton",
            "category": {"id": 3, "name": "Clothes", "slug": "clothes", "image": "https://x/c.png"},
            "images": ["https://x/1.png", "https://x/2.png"],
            "creationAt": "2024-01-01T00:00:00.000Z"
        }"#;
        let product: Product = serde_json::from_str(raw).expect("decode");
        assert_eq!(product.id, ProductId(7));
        assert_eq!(product.price, 25.0);
        assert_eq!(product.category_name(), "Clothes");
        assert_eq!(product.category_id(), Some(CategoryId(3)));
        assert_eq!(product.first_image(), Some("https://x/1.png"));
    }

    #[test]
    fn missing_category_and_images_fall_back_to_empty() {
        let product: Product =
            serde_json::from_str(r#"{"id": 1, "title": "Bare", "price": 2.5}"#).expect("decode");
        assert_eq!(product.category, None);
        assert_eq!(product.category_name(), "");
        assert!(product.images.is_empty());
        assert_eq!(product.first_image(), None);
        assert_eq!(product.description, "");
    }

    #[test]
    fn null_fields_fall_back_like_missing_ones() {
        let raw = r#"{
            "id": 4,
            "title": "Nulls",
            "price": null,
            "description": null,
            "category": {"id": 2, "name": null},
            "images": null
        }"#;
        let product: Product = serde_json::from_str(raw).expect("decode");
        assert_eq!(product.price, 0.0);
        assert_eq!(product.description, "");
        assert!(product.images.is_empty());
        assert_eq!(product.category_id(), Some(CategoryId(2)));
        assert_eq!(product.category_name(), "");

        let listed: Vec<Product> = serde_json::from_str(
            r#"[{"id": 1, "title": "a", "price": 1, "images": null},
                {"id": 2, "title": "b", "price": 2, "category": null, "description": null}]"#,
        )
        .expect("decode list");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[1].category, None);
    }

    #[test]
    fn sort_direction_flips() {
        assert_eq!(SortDirection::Ascending.flipped(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.flipped(), SortDirection::Ascending);
    }
}
