//! Variant handlers.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::{get, post},
    Router,
};

use common::{ActionResult, AppResult};
use domain::{CurrentUser, UpsertVariant, VariantId, VariantWithChildren};

use crate::api::auth::{identity, require_admin};
use crate::api::AppState;
use crate::service::{delete_variant_action, upsert_variant_action};

/// Create variant routes
pub fn variant_routes() -> Router<AppState> {
    Router::new()
        .route("/variants", post(upsert_variant))
        .route("/variants/:id", get(get_variant).delete(delete_variant))
}

/// Create or edit a variant (admin only)
#[utoipa::path(
    post,
    path = "/variants",
    tag = "Variants",
    security(("bearer_auth" = [])),
    request_body = UpsertVariant,
    responses(
        (status = 200, description = "`{success}` or `{error}` envelope"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn upsert_variant(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Json(input): Json<UpsertVariant>,
) -> AppResult<Json<ActionResult<String>>> {
    let user = identity(user);
    require_admin(user.as_ref())?;

    Ok(Json(
        upsert_variant_action(state.variant_service.as_ref(), input).await,
    ))
}

/// Get a variant with its images and tags
#[utoipa::path(
    get,
    path = "/variants/{id}",
    tag = "Variants",
    params(
        ("id" = i32, Path, description = "Variant ID")
    ),
    responses(
        (status = 200, description = "Variant with images and tags", body = VariantWithChildren),
        (status = 404, description = "Variant not found")
    )
)]
pub async fn get_variant(
    State(state): State<AppState>,
    Path(id): Path<VariantId>,
) -> AppResult<Json<VariantWithChildren>> {
    let variant = state.variant_service.get_variant(id).await?;
    Ok(Json(variant))
}

/// Delete a variant (admin only)
#[utoipa::path(
    delete,
    path = "/variants/{id}",
    tag = "Variants",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Variant ID")
    ),
    responses(
        (status = 200, description = "`{success}` or `{error}` envelope"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn delete_variant(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<VariantId>,
) -> AppResult<Json<ActionResult<String>>> {
    let user = identity(user);
    require_admin(user.as_ref())?;

    Ok(Json(
        delete_variant_action(state.variant_service.as_ref(), id).await,
    ))
}
