mod common;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use storefront_api::{
    dto::products::{CreateProductRequest, UpdateProductRequest},
    entity::{AuditLogs, audit_logs::Column as AuditCol},
    error::AppError,
    middleware::auth::AdminUser,
    models::Role,
    services::{product_service, user_service},
};

use common::{admin, product_request, setup_state, signup};

#[tokio::test]
async fn add_product_persists_and_rejects_duplicate_pid() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = admin(&state, "root@x.com").await?;

    let resp = product_service::add_product(&state, &admin, product_request(1, "Milk", 10)).await?;
    assert_eq!(resp.message, "Product added successfully");
    let product = resp.data.expect("product");
    assert_eq!(product.pid, 1);
    assert_eq!(product.price, "50");

    let stored = product_service::find_by_pid(&state.orm, 1).await?.expect("stored");
    assert_eq!(stored.id, product.id);

    let err = product_service::add_product(&state, &admin, product_request(1, "Other", 3))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateProductId(1)));
    Ok(())
}

#[tokio::test]
async fn price_is_kept_as_text() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = admin(&state, "root@x.com").await?;

    let payload: CreateProductRequest = serde_json::from_str(
        r#"{"pID":5,"name":"Tea","price":12.5,"mfDate":"01/02/2024","quantity":0}"#,
    )?;
    let product = product_service::add_product(&state, &admin, payload)
        .await?
        .data
        .expect("product");
    assert_eq!(product.price, "12.5");
    assert_eq!(product.mf_date.as_deref(), Some("01/02/2024"));

    let payload: CreateProductRequest =
        serde_json::from_str(r#"{"pID":6,"name":"Odd","price":"cheap","quantity":1}"#)?;
    let product = product_service::add_product(&state, &admin, payload)
        .await?
        .data
        .expect("product");
    assert_eq!(product.price, "cheap");
    Ok(())
}

#[tokio::test]
async fn negative_stock_is_rejected() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = admin(&state, "root@x.com").await?;

    let err = product_service::add_product(&state, &admin, product_request(1, "Milk", -1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert!(product_service::find_by_pid(&state.orm, 1).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn update_is_partial_and_keyed_by_pid() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = admin(&state, "root@x.com").await?;
    let original = product_service::add_product(&state, &admin, product_request(1, "Milk", 10))
        .await?
        .data
        .expect("product");

    let resp = product_service::update_product(
        &state,
        &admin,
        1,
        UpdateProductRequest {
            price: Some("55".into()),
            quantity: Some(4),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(resp.message, "Product updated successfully");
    let updated = resp.data.expect("product");
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.pid, 1);
    assert_eq!(updated.name, "Milk");
    assert_eq!(updated.price, "55");
    assert_eq!(updated.quantity, 4);
    assert_eq!(updated.mf_date, original.mf_date);

    let unchanged =
        product_service::update_product(&state, &admin, 1, UpdateProductRequest::default())
            .await?
            .data
            .expect("product");
    assert_eq!(unchanged.price, "55");

    let err = product_service::update_product(&state, &admin, 2, UpdateProductRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound("Product")));
    Ok(())
}

#[tokio::test]
async fn delete_twice_reports_not_found_and_is_audited() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = admin(&state, "root@x.com").await?;
    product_service::add_product(&state, &admin, product_request(1, "Milk", 10)).await?;

    let resp = product_service::delete_product(&state, &admin, 1).await?;
    assert_eq!(resp.message, "Product deleted successfully");
    assert_eq!(resp.data.expect("deleted").pid, 1);
    assert!(product_service::find_by_pid(&state.orm, 1).await?.is_none());

    let err = product_service::delete_product(&state, &admin, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound("Product")));

    let entry = AuditLogs::find()
        .filter(AuditCol::Action.eq("product_delete"))
        .one(&state.orm)
        .await?
        .expect("audit entry");
    assert_eq!(entry.user_id, Some(admin.user().user_id));
    let metadata = entry.metadata.expect("metadata");
    assert_eq!(metadata["pID"], 1);
    assert_eq!(metadata["admin_email"], "root@x.com");
    assert_eq!(metadata["admin_name"], "root");
    assert!(metadata["deleted_at"].is_string());
    Ok(())
}

#[tokio::test]
async fn plain_users_cannot_become_admins() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let user = signup(&state, "a@x.com", "pw", Role::User).await?;

    let err = AdminUser::try_from(user).unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
    assert_eq!(err.to_string(), "Admin access denied");
    Ok(())
}

#[tokio::test]
async fn list_users_shows_cart_lines() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = admin(&state, "root@x.com").await?;
    let user = signup(&state, "a@x.com", "pw", Role::User).await?;
    let milk = common::add_product(&state, &admin, 1, "Milk").await?;
    storefront_api::services::cart_service::add_to_cart(
        &state,
        &user,
        storefront_api::dto::cart::AddToCartRequest {
            pid: 1,
            quantity: Some(3),
        },
    )
    .await?;

    let resp = user_service::list_users(&state, &admin).await?;
    let users = resp.data.expect("users").items;
    assert_eq!(users.len(), 2);
    let shopper = users.iter().find(|u| u.id == user.user_id).expect("shopper");
    assert_eq!(shopper.cart.len(), 1);
    assert_eq!(shopper.cart[0].product_id, milk.id);
    assert_eq!(shopper.cart[0].quantity, 3);
    Ok(())
}
