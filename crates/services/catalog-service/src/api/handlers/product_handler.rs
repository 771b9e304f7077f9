//! Product handlers.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::{delete, get, post},
    Router,
};

use common::{ActionResult, AppResult};
use domain::{CurrentUser, DashboardProduct, NewProduct, ProductId};

use crate::api::auth::{identity, require_admin};
use crate::api::AppState;
use crate::service::{create_product_action, delete_product_action};

/// Create product routes
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", post(create_product))
        .route("/products/:id", delete(delete_product))
        .route("/dashboard/products", get(dashboard_products))
}

/// Create a product (admin only)
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    request_body = NewProduct,
    responses(
        (status = 200, description = "`{success}` or `{error}` envelope"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Json(input): Json<NewProduct>,
) -> AppResult<Json<ActionResult<String>>> {
    let user = identity(user);
    require_admin(user.as_ref())?;

    Ok(Json(
        create_product_action(state.product_service.as_ref(), input).await,
    ))
}

/// Delete a product and everything it owns (admin only)
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "`{success}` or `{error}` envelope"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<ProductId>,
) -> AppResult<Json<ActionResult<String>>> {
    let user = identity(user);
    require_admin(user.as_ref())?;

    Ok(Json(
        delete_product_action(state.product_service.as_ref(), id).await,
    ))
}

/// Admin catalog table (admin only)
#[utoipa::path(
    get,
    path = "/dashboard/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    responses(
        (
            status = 200,
            description = "Products with variants, newest first",
            body = Vec<DashboardProduct>
        ),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn dashboard_products(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> AppResult<Json<Vec<DashboardProduct>>> {
    let user = identity(user);
    require_admin(user.as_ref())?;

    let rows = state.product_service.dashboard_products().await?;
    Ok(Json(rows))
}
