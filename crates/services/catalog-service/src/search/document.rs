//! Index document shapes.

use serde::{Deserialize, Serialize};

use domain::{Product, ProductId, ProductVariant, UpsertVariant, VariantId};

/// Full index record for one variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDocument {
    #[serde(rename = "objectID")]
    pub object_id: String,
    /// Owning product id
    pub id: ProductId,
    pub title: String,
    pub price: f32,
    pub product_type: String,
    /// Primary image url; `null` when the variant has no images
    pub variant_images: Option<String>,
}

impl SearchDocument {
    pub fn for_variant(
        product: &Product,
        variant: &ProductVariant,
        primary_image: Option<&str>,
    ) -> Self {
        Self {
            object_id: object_id(variant.id),
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            product_type: variant.product_type.clone(),
            variant_images: primary_image.map(str::to_string),
        }
    }
}

/// Fields rewritten when a variant is edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPatch {
    #[serde(rename = "objectID")]
    pub object_id: String,
    pub id: ProductId,
    pub product_type: String,
    pub variant_images: Option<String>,
}

impl SearchPatch {
    pub fn for_edit(variant: &ProductVariant, input: &UpsertVariant) -> Self {
        Self {
            object_id: object_id(variant.id),
            id: variant.product_id,
            product_type: variant.product_type.clone(),
            variant_images: input.first_image_url().map(str::to_string),
        }
    }
}

/// Queued index mutation, stored as JSON in the outbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum IndexOperation {
    Save { document: SearchDocument },
    PartialUpdate { patch: SearchPatch },
    Delete { object_id: String },
}

impl IndexOperation {
    pub fn object_id(&self) -> &str {
        match self {
            IndexOperation::Save { document } => &document.object_id,
            IndexOperation::PartialUpdate { patch } => &patch.object_id,
            IndexOperation::Delete { object_id } => object_id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            IndexOperation::Save { .. } => "save",
            IndexOperation::PartialUpdate { .. } => "partial_update",
            IndexOperation::Delete { .. } => "delete",
        }
    }
}

/// Index object id for a variant.
pub fn object_id(variant_id: VariantId) -> String {
    variant_id.to_string()
}
