//! Domain layer - Catalog entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Write inputs carry their own `validator` rules so every entry point
//! rejects malformed payloads before touching the store.

pub mod clock;
pub mod constants;
pub mod error;
pub mod product;
pub mod review;
pub mod user;
pub mod variant;

pub use clock::{Clock, FixedClock, SystemClock};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use product::{DashboardProduct, NewProduct, Product, ProductId, ProductWithVariants};
pub use review::{NewReview, Review, ReviewId};
pub use user::{CurrentUser, UserRole};
pub use variant::{
    ProductVariant, UpsertVariant, VariantId, VariantImage, VariantImageInput, VariantTag,
    VariantWithChildren,
};
