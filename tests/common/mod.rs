#![allow(dead_code)]

use sea_orm::{ConnectOptions, Database};
use storefront_api::{
    db::run_migrations,
    dto::{auth::SignupRequest, products::CreateProductRequest},
    middleware::auth::{AdminUser, AuthUser},
    models::{Product, Role},
    services::{auth_service, product_service},
    state::AppState,
};

pub const SECRET: &str = "integration-test-secret";

/// A fresh in-memory database with migrations applied.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // Every connection to `:memory:` is its own database, so keep exactly one.
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let orm = Database::connect(options).await?;
    run_migrations(&orm).await?;
    Ok(AppState::new(orm, SECRET))
}

pub async fn signup(
    state: &AppState,
    email: &str,
    password: &str,
    role: Role,
) -> anyhow::Result<AuthUser> {
    let resp = auth_service::signup(
        state,
        SignupRequest {
            name: Some(email.split('@').next().unwrap_or_default().to_string()),
            email: email.to_string(),
            password: password.to_string(),
            role,
        },
    )
    .await?;
    let profile = resp.data.expect("profile");
    Ok(AuthUser {
        user_id: profile.id,
        role: profile.role,
    })
}

pub async fn admin(state: &AppState, email: &str) -> anyhow::Result<AdminUser> {
    let user = signup(state, email, "admin-pw", Role::Admin).await?;
    Ok(AdminUser::try_from(user)?)
}

pub fn product_request(pid: i64, name: &str, quantity: i32) -> CreateProductRequest {
    CreateProductRequest {
        pid,
        name: name.to_string(),
        price: "50".to_string(),
        mf_date: Some("2024-01-01".to_string()),
        exp_date: None,
        quantity,
    }
}

pub async fn add_product(
    state: &AppState,
    admin: &AdminUser,
    pid: i64,
    name: &str,
) -> anyhow::Result<Product> {
    let resp = product_service::add_product(state, admin, product_request(pid, name, 10)).await?;
    Ok(resp.data.expect("product"))
}
