//! Application services layer - catalog write use cases.
//!
//! Services return `AppResult`; the `*_action` functions are the boundary
//! that turns every outcome into an `ActionResult` envelope with fixed
//! user-facing messages.

pub mod container;
mod product_service;
mod review_service;
mod variant_service;

pub use container::{Collaborators, ServiceContainer, Services};
pub use product_service::{
    create_product_action, delete_product_action, ProductManager, ProductService,
};
pub use review_service::{add_review_action, ReviewManager, ReviewService};
pub use variant_service::{
    delete_variant_action, upsert_variant_action, VariantManager, VariantService,
};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use product_service::MockProductService;
#[cfg(any(test, feature = "test-utils"))]
pub use review_service::MockReviewService;
#[cfg(any(test, feature = "test-utils"))]
pub use variant_service::MockVariantService;
