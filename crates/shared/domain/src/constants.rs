//! Domain-level constants.
//!
//! These constants define business rules, user-facing messages and the
//! view paths shared by the write services.

// =============================================================================
// User Roles
// =============================================================================

/// Default role assigned to new users
pub const ROLE_USER: &str = "user";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// Action Messages
// =============================================================================

/// Generic failure returned by the variant write path
pub const MSG_VARIANT_FAILED: &str = "Failed to create variant";

/// Failure returned when deleting a variant fails
pub const MSG_VARIANT_DELETE_FAILED: &str = "Failed to delete variant";

/// Failure returned by the product write path
pub const MSG_PRODUCT_FAILED: &str = "Failed to save product";

/// Review submitted without a signed-in user
pub const MSG_SIGN_IN: &str = "Please sign in";

/// Review submitted twice for the same product
pub const MSG_ALREADY_REVIEWED: &str = "You have already reviewed this product";

/// Generic failure returned by the review write path
pub const MSG_REVIEW_FAILED: &str = "Failed to add review";

// =============================================================================
// View Paths
// =============================================================================

/// Admin catalog listing
pub const PATH_DASHBOARD_PRODUCTS: &str = "/dashboard/products";

/// Product detail page for a product id
pub fn product_path(product_id: i32) -> String {
    format!("/products/{}", product_id)
}
