//! Product variant entity and the upsert payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::{DomainError, DomainResult};
use crate::product::ProductId;

pub type VariantId = i32;

/// Purchasable configuration (color/type) of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: VariantId,
    pub product_id: ProductId,
    pub color: String,
    pub product_type: String,
    pub updated: DateTime<Utc>,
}

/// Image owned by a variant. `order` fixes the display sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct VariantImage {
    pub id: i32,
    pub variant_id: VariantId,
    pub url: String,
    pub size: String,
    pub name: String,
    pub order: f32,
}

/// Free-text tag owned by a variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct VariantTag {
    pub id: i32,
    pub variant_id: VariantId,
    pub tag: String,
}

/// Variant together with its owned images (display order) and tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct VariantWithChildren {
    #[serde(flatten)]
    pub variant: ProductVariant,
    #[serde(rename = "variantImages")]
    pub images: Vec<VariantImage>,
    #[serde(rename = "variantTags")]
    pub tags: Vec<VariantTag>,
}

impl VariantWithChildren {
    /// First image in display order.
    pub fn primary_image(&self) -> Option<&VariantImage> {
        self.images.first()
    }

    /// Tag values in insertion order.
    pub fn tag_values(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.tag.as_str()).collect()
    }
}

/// Image as submitted by the uploader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VariantImageInput {
    #[validate(length(min = 1, message = "Image name is required"))]
    pub name: String,
    pub size: String,
    #[validate(url(message = "Image url must be a valid URL"))]
    pub url: String,
}

/// Create-or-edit payload for a variant.
///
/// With `edit_mode` set, `id` names the variant to rewrite; otherwise a new
/// variant is created under `product_id`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_edit_target", skip_on_field_errors = false))]
pub struct UpsertVariant {
    #[serde(default)]
    pub edit_mode: bool,
    #[serde(default)]
    pub id: Option<VariantId>,
    #[serde(alias = "productID")]
    pub product_id: ProductId,
    #[validate(length(min = 1, message = "Color is required"))]
    pub color: String,
    #[validate(length(min = 1, message = "Product type is required"))]
    pub product_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, alias = "variantImages")]
    #[validate(nested)]
    pub images: Vec<VariantImageInput>,
}

impl UpsertVariant {
    /// URL of the first submitted image.
    pub fn first_image_url(&self) -> Option<&str> {
        self.images.first().map(|image| image.url.as_str())
    }

    /// Variant to rewrite, or `None` when creating.
    pub fn edit_target(&self) -> DomainResult<Option<VariantId>> {
        match (self.edit_mode, self.id) {
            (true, Some(id)) => Ok(Some(id)),
            (true, None) => Err(DomainError::validation(EDIT_TARGET_REQUIRED)),
            (false, _) => Ok(None),
        }
    }
}

const EDIT_TARGET_REQUIRED: &str = "Variant id is required in edit mode";

fn validate_edit_target(input: &UpsertVariant) -> Result<(), ValidationError> {
    if input.edit_target().is_err() {
        let mut err = ValidationError::new("edit_target");
        err.message = Some(EDIT_TARGET_REQUIRED.into());
        return Err(err);
    }
    Ok(())
}
