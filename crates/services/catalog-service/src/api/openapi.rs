//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use domain::{
    DashboardProduct, NewProduct, NewReview, ProductVariant, Review, UpsertVariant, VariantImage,
    VariantImageInput, VariantTag, VariantWithChildren,
};

use super::handlers::review_handler::ReviewRequest;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::variant_handler::upsert_variant,
        crate::api::handlers::variant_handler::get_variant,
        crate::api::handlers::variant_handler::delete_variant,
        crate::api::handlers::product_handler::create_product,
        crate::api::handlers::product_handler::delete_product,
        crate::api::handlers::product_handler::dashboard_products,
        crate::api::handlers::review_handler::add_review,
        crate::api::handlers::review_handler::list_reviews,
    ),
    components(
        schemas(
            UpsertVariant,
            VariantImageInput,
            ProductVariant,
            VariantImage,
            VariantTag,
            VariantWithChildren,
            NewProduct,
            DashboardProduct,
            NewReview,
            ReviewRequest,
            Review,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Variants", description = "Product variant writes"),
        (name = "Products", description = "Product lifecycle and admin catalog"),
        (name = "Reviews", description = "Product reviews"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
