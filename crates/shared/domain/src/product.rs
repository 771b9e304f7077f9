//! Product aggregate root and catalog read models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::variant::VariantWithChildren;

pub type ProductId = i32;

/// Catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: f32,
    pub created: DateTime<Utc>,
}

/// Product creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewProduct {
    #[validate(length(min = 2, message = "Title must be at least 2 characters long"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "Price must be a non-negative number"))]
    pub price: f32,
}

/// Product with its full variant tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductWithVariants {
    #[serde(flatten)]
    pub product: Product,
    pub variants: Vec<VariantWithChildren>,
}

impl ProductWithVariants {
    /// URL of the first variant's primary image, if any.
    pub fn cover_image(&self) -> Option<&str> {
        self.variants
            .first()
            .and_then(VariantWithChildren::primary_image)
            .map(|image| image.url.as_str())
    }
}

/// Row of the admin catalog table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DashboardProduct {
    pub id: ProductId,
    pub title: String,
    pub price: f32,
    pub variants: Vec<VariantWithChildren>,
    pub image: String,
}

impl DashboardProduct {
    /// Build a table row, falling back to `placeholder` when no variant image exists.
    pub fn from_tree(tree: ProductWithVariants, placeholder: &str) -> Self {
        let image = tree.cover_image().unwrap_or(placeholder).to_string();
        Self {
            id: tree.product.id,
            title: tree.product.title,
            price: tree.product.price,
            variants: tree.variants,
            image,
        }
    }
}
