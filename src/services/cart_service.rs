//! Cart merge engine.
//!
//! Adding a product that is already in the cart accumulates into the existing
//! line instead of overwriting it, so a user never has two lines for the same
//! product. The merge is one `INSERT ... ON CONFLICT DO UPDATE` statement
//! against the `(user_id, product_id)` unique index, which keeps concurrent
//! adds from losing updates.

use chrono::Utc;
use sea_orm::{
    ActiveValue::{NotSet, Set},
    ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
    sea_query::{Alias, Expr, OnConflict},
};
use uuid::Uuid;

use crate::{
    audit,
    db::OrmConn,
    dto::cart::{AddToCartRequest, Cart, CartView},
    entity::{
        CartItems, Products, Users,
        cart_items::{ActiveModel as CartActive, Column as CartCol},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{CartEntry, Product},
    response::{ApiResponse, Meta},
    services::{product_service, user_service},
    state::AppState,
};

pub const DEFAULT_QUANTITY: i32 = 1;

/// Largest quantity a single cart line can hold.
pub const MAX_LINE_QUANTITY: i32 = i32::MAX;

/// Atomically adds `quantity` to the user's line for `product_id`, creating it if absent.
///
/// Fails with `BadRequest` when the merged quantity would exceed [`MAX_LINE_QUANTITY`];
/// the stored line is left as it was.
pub async fn merge_line(
    db: &OrmConn,
    user_id: Uuid,
    product_id: Uuid,
    quantity: i32,
) -> AppResult<()> {
    let line = CartActive {
        id: NotSet,
        user_id: Set(user_id),
        product_id: Set(product_id),
        quantity: Set(quantity),
        added_at: Set(Utc::now().into()),
    };

    let requested = Expr::col((Alias::new("excluded"), CartCol::Quantity));
    let accumulate = OnConflict::columns([CartCol::UserId, CartCol::ProductId])
        .value(
            CartCol::Quantity,
            Expr::col((CartItems, CartCol::Quantity)).add(requested.clone()),
        )
        // The sum must still fit the column; otherwise nothing is written.
        .action_and_where(
            Expr::col((CartItems, CartCol::Quantity))
                .lte(Expr::val(MAX_LINE_QUANTITY).sub(requested)),
        )
        .to_owned();

    let written = CartItems::insert(line)
        .on_conflict(accumulate)
        .exec_without_returning(db)
        .await?;
    if written == 0 {
        return Err(AppError::BadRequest(format!(
            "cart quantity must not exceed {MAX_LINE_QUANTITY}"
        )));
    }
    Ok(())
}

/// Merges the requested quantity of product `pid` into the user's cart and returns
/// the whole cart with product references unresolved.
pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<Cart>> {
    let quantity = payload.quantity.unwrap_or(DEFAULT_QUANTITY);
    if quantity <= 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }

    if Users::find_by_id(user.user_id).one(&state.orm).await?.is_none() {
        return Err(AppError::NotFound("User"));
    }

    let product = product_service::find_by_pid(&state.orm, payload.pid)
        .await?
        .ok_or(AppError::NotFound("Product"))?;

    merge_line(&state.orm, user.user_id, product.id, quantity).await?;

    tracing::info!(
        user_id = %user.user_id,
        pid = payload.pid,
        quantity,
        "cart line merged"
    );
    audit::record(
        &state.orm,
        Some(user.user_id),
        "cart_update",
        Some("cart_items"),
        Some(serde_json::json!({ "pID": payload.pid, "quantity": quantity })),
    )
    .await;

    let items = user_service::cart_lines(&state.orm, user.user_id).await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Product added to cart",
        Cart { items },
        Some(meta),
    ))
}

/// The cart with every product reference resolved to the current catalog entry.
pub async fn view_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartView>> {
    let items: Vec<CartEntry> = CartItems::find()
        .filter(CartCol::UserId.eq(user.user_id))
        .order_by_asc(CartCol::Id)
        .find_also_related(Products)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(line, product)| CartEntry {
            product: product.map(Product::from),
            quantity: line.quantity,
        })
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Cart", CartView { items }, Some(meta)))
}
