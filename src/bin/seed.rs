use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set};
use uuid::Uuid;

use storefront_api::{
    config::AppConfig,
    db::{OrmConn, create_orm_conn, is_unique_violation, run_migrations},
    entity::products::ActiveModel as ProductActive,
    error::AppError,
    models::Role,
    security::password::PasswordHasher,
    services::user_service::{self, NewUser},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter("info").init();

    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let email = std::env::var("SEED_ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".into());
    let password = std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into());
    ensure_user(&orm, "Admin", &email, &password, Role::Admin).await?;
    ensure_user(&orm, "User", "user@example.com", "user123", Role::User).await?;
    seed_products(&orm).await?;

    tracing::info!("seed completed");
    Ok(())
}

async fn ensure_user(
    orm: &OrmConn,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
) -> anyhow::Result<()> {
    let password_hash = PasswordHasher::new().hash(password)?;
    let created = user_service::create(
        orm,
        NewUser {
            name: Some(name.to_string()),
            email: email.to_string(),
            password_hash,
            role,
        },
    )
    .await;

    match created {
        Ok(user) => tracing::info!(user_id = %user.id, email, ?role, "seeded user"),
        Err(AppError::DuplicateEmail) => tracing::info!(email, "user already present"),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

async fn seed_products(orm: &OrmConn) -> anyhow::Result<()> {
    let products = [
        (1, "Milk", "50", 10),
        (2, "Bread", "35", 25),
        (3, "Eggs (dozen)", "90", 40),
        (4, "Rice 5kg", "420", 12),
    ];

    for (pid, name, price, quantity) in products {
        let active = ProductActive {
            id: Set(Uuid::new_v4()),
            pid: Set(pid),
            name: Set(name.to_string()),
            price: Set(price.to_string()),
            mf_date: Set(None),
            exp_date: Set(None),
            quantity: Set(quantity),
            created_at: Set(Utc::now().into()),
        };
        match active.insert(orm).await {
            Ok(_) => tracing::info!(pid, name, "seeded product"),
            Err(err) if is_unique_violation(&err) => tracing::info!(pid, "product already present"),
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
