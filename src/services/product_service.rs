use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    audit,
    db::{OrmConn, is_unique_violation},
    dto::products::{CreateProductRequest, DeletedProduct, ProductList, UpdateProductRequest},
    entity::products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult},
    middleware::auth::{AdminUser, AuthUser},
    models::Product,
    response::{ApiResponse, Meta},
    services::user_service,
    state::AppState,
};

/// Catalog lookup by business identifier.
pub async fn find_by_pid(db: &OrmConn, pid: i64) -> AppResult<Option<ProductModel>> {
    Ok(Products::find().filter(Column::Pid.eq(pid)).one(db).await?)
}

pub async fn list_products(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<ProductList>> {
    tracing::debug!(user_id = %user.user_id, "listing products");
    let items: Vec<Product> = Products::find()
        .order_by_asc(Column::Pid)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn add_product(
    state: &AppState,
    admin: &AdminUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_stock(payload.quantity)?;

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        pid: Set(payload.pid),
        name: Set(payload.name),
        price: Set(payload.price),
        mf_date: Set(payload.mf_date),
        exp_date: Set(payload.exp_date),
        quantity: Set(payload.quantity),
        created_at: Set(Utc::now().into()),
    };
    let product = match active.insert(&state.orm).await {
        Ok(product) => product,
        Err(err) if is_unique_violation(&err) => {
            return Err(AppError::DuplicateProductId(payload.pid));
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(pid = product.pid, admin_id = %admin.user().user_id, "product added");
    audit::record(
        &state.orm,
        Some(admin.user().user_id),
        "product_create",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id, "pID": product.pid })),
    )
    .await;

    Ok(ApiResponse::success(
        "Product added successfully",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    admin: &AdminUser,
    pid: i64,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let existing = find_by_pid(&state.orm, pid)
        .await?
        .ok_or(AppError::NotFound("Product"))?;

    let mut active: ActiveModel = existing.clone().into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(mf_date) = payload.mf_date {
        active.mf_date = Set(Some(mf_date));
    }
    if let Some(exp_date) = payload.exp_date {
        active.exp_date = Set(Some(exp_date));
    }
    if let Some(quantity) = payload.quantity {
        ensure_stock(quantity)?;
        active.quantity = Set(quantity);
    }

    let product = if active.is_changed() {
        active.update(&state.orm).await?
    } else {
        existing
    };

    tracing::info!(pid, admin_id = %admin.user().user_id, "product updated");
    audit::record(
        &state.orm,
        Some(admin.user().user_id),
        "product_update",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id, "pID": pid })),
    )
    .await;

    Ok(ApiResponse::success(
        "Product updated successfully",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

/// Deletes by pID and attributes the deletion to the acting admin.
pub async fn delete_product(
    state: &AppState,
    admin: &AdminUser,
    pid: i64,
) -> AppResult<ApiResponse<DeletedProduct>> {
    let admin_id = admin.user().user_id;
    let actor = user_service::find_by_id(&state.orm, admin_id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    let result = Products::delete_many()
        .filter(Column::Pid.eq(pid))
        .exec(&state.orm)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Product"));
    }

    let deleted_at = Utc::now().to_rfc3339();
    let admin_name = actor.name.unwrap_or_default();
    tracing::info!(
        pid,
        admin_name = %admin_name,
        admin_email = %actor.email,
        deleted_at = %deleted_at,
        "product deleted"
    );
    audit::record(
        &state.orm,
        Some(admin_id),
        "product_delete",
        Some("products"),
        Some(serde_json::json!({
            "pID": pid,
            "admin_name": admin_name,
            "admin_email": actor.email,
            "deleted_at": deleted_at,
        })),
    )
    .await;

    Ok(ApiResponse::success(
        "Product deleted successfully",
        DeletedProduct { pid },
        Some(Meta::empty()),
    ))
}

fn ensure_stock(quantity: i32) -> AppResult<()> {
    if quantity < 0 {
        return Err(AppError::BadRequest("quantity must not be negative".into()));
    }
    Ok(())
}
