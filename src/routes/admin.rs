use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};

use crate::{
    dto::{
        products::{CreateProductRequest, DeletedProduct, UpdateProductRequest},
        users::UserList,
    },
    error::AppResult,
    middleware::auth::AdminUser,
    models::Product,
    response::ApiResponse,
    services::{product_service, user_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/products", post(add_product))
        .route("/products/{pid}", put(update_product).delete(delete_product))
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "All users without passwords", body = ApiResponse<UserList>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access denied"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_users(
    State(state): State<AppState>,
    admin: AdminUser,
) -> AppResult<Json<ApiResponse<UserList>>> {
    let resp = user_service::list_users(&state, &admin).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Product added successfully", body = ApiResponse<Product>),
        (status = 403, description = "Admin access denied"),
        (status = 409, description = "Duplicate pID"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn add_product(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::add_product(&state, &admin, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{pid}",
    params(
        ("pid" = i64, Path, description = "Product business identifier (pID)")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated successfully", body = ApiResponse<Product>),
        (status = 403, description = "Admin access denied"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_product(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(pid): Path<i64>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::update_product(&state, &admin, pid, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{pid}",
    params(
        ("pid" = i64, Path, description = "Product business identifier (pID)")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = ApiResponse<DeletedProduct>),
        (status = 403, description = "Admin access denied"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(pid): Path<i64>,
) -> AppResult<Json<ApiResponse<DeletedProduct>>> {
    let resp = product_service::delete_product(&state, &admin, pid).await?;
    Ok(Json(resp))
}
