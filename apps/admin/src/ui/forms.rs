//! Detail/create form drafts and their inline alerts.

use shared::{
    domain::{CategoryId, Product, FALLBACK_CATEGORY_ID},
    protocol::{parse_images, ProductPayload},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Detail,
    Create,
}

impl FormKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "detail" | "edit" => Some(Self::Detail),
            "create" | "new" => Some(Self::Create),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Detail => "detail",
            Self::Create => "create",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Price,
    Description,
    CategoryId,
    Images,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        Self::Title,
        Self::Price,
        Self::Description,
        Self::CategoryId,
        Self::Images,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "title" => Some(Self::Title),
            "price" => Some(Self::Price),
            "description" | "desc" => Some(Self::Description),
            "categoryid" | "category_id" | "category" => Some(Self::CategoryId),
            "images" | "image" => Some(Self::Images),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Price => "price",
            Self::Description => "description",
            Self::CategoryId => "categoryId",
            Self::Images => "images",
        }
    }
}

/// Field values as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub title: String,
    pub price: String,
    pub description: String,
    pub category_id: String,
    pub images: String,
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
            category_id: product
                .category_id()
                .unwrap_or(FALLBACK_CATEGORY_ID)
                .to_string(),
            images: product.images.join(", "),
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Price => &self.price,
            FormField::Description => &self.description,
            FormField::CategoryId => &self.category_id,
            FormField::Images => &self.images,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Title => self.title = value,
            FormField::Price => self.price = value,
            FormField::Description => self.description = value,
            FormField::CategoryId => self.category_id = value,
            FormField::Images => self.images = value,
        }
    }

    /// Empty numeric fields count as zero; anything else that does not parse is rejected.
    pub fn to_payload(&self) -> Result<ProductPayload, String> {
        let price = match self.price.trim() {
            "" => 0.0,
            raw => raw
                .parse::<f64>()
                .ok()
                .filter(|price| price.is_finite())
                .ok_or_else(|| format!("Price must be a number, got '{raw}'"))?,
        };
        let category_id = match self.category_id.trim() {
            "" => 0,
            raw => raw
                .parse::<i64>()
                .map_err(|_| format!("Category id must be an integer, got '{raw}'"))?,
        };

        Ok(ProductPayload {
            title: self.title.trim().to_string(),
            price,
            description: self.description.trim().to_string(),
            category_id: CategoryId(category_id),
            images: parse_images(&self.images),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Failure,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub open: bool,
    pub fields: ProductForm,
    pub alert: Option<Alert>,
    pub in_flight: bool,
}
