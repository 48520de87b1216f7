//! Credential store: persisted user records and their read-only projections.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    db::{OrmConn, is_unique_violation},
    entity::{
        CartItems, Users,
        cart_items::Column as CartCol,
        users::{ActiveModel as UserActive, Column as UserCol, Model as UserModel},
    },
    dto::users::UserList,
    error::{AppError, AppResult},
    middleware::auth::{AdminUser, AuthUser},
    models::{CartLine, Role, UserProfile},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub struct NewUser {
    pub name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

pub async fn find_by_email(db: &OrmConn, email: &str) -> AppResult<Option<UserModel>> {
    Ok(Users::find()
        .filter(UserCol::Email.eq(email))
        .one(db)
        .await?)
}

/// Inserts the user in one statement; the unique email index rejects duplicates.
pub async fn create(db: &OrmConn, user: NewUser) -> AppResult<UserModel> {
    let active = UserActive {
        id: Set(Uuid::new_v4()),
        name: Set(user.name),
        email: Set(user.email),
        password_hash: Set(user.password_hash),
        role: Set(user.role),
        created_at: Set(Utc::now().into()),
    };

    match active.insert(db).await {
        Ok(model) => Ok(model),
        Err(err) if is_unique_violation(&err) => Err(AppError::DuplicateEmail),
        Err(err) => Err(err.into()),
    }
}

pub async fn find_by_id(db: &OrmConn, id: Uuid) -> AppResult<Option<UserProfile>> {
    let Some(user) = Users::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let cart = cart_lines(db, id).await?;
    Ok(Some(UserProfile::from_entity(user, cart)))
}

pub async fn list_all(db: &OrmConn) -> AppResult<Vec<UserProfile>> {
    let users = Users::find()
        .order_by_asc(UserCol::CreatedAt)
        .all(db)
        .await?;

    let mut carts: HashMap<Uuid, Vec<CartLine>> = HashMap::new();
    for line in CartItems::find().order_by_asc(CartCol::Id).all(db).await? {
        carts.entry(line.user_id).or_default().push(CartLine {
            product_id: line.product_id,
            quantity: line.quantity,
        });
    }

    Ok(users
        .into_iter()
        .map(|user| {
            let cart = carts.remove(&user.id).unwrap_or_default();
            UserProfile::from_entity(user, cart)
        })
        .collect())
}

/// The user's cart lines in insertion order, product references unresolved.
pub async fn cart_lines(db: &OrmConn, user_id: Uuid) -> AppResult<Vec<CartLine>> {
    let lines = CartItems::find()
        .filter(CartCol::UserId.eq(user_id))
        .order_by_asc(CartCol::Id)
        .all(db)
        .await?
        .into_iter()
        .map(|line| CartLine {
            product_id: line.product_id,
            quantity: line.quantity,
        })
        .collect();
    Ok(lines)
}

pub async fn get_profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<UserProfile>> {
    let profile = find_by_id(&state.orm, user.user_id)
        .await?
        .ok_or(AppError::NotFound("User"))?;
    Ok(ApiResponse::success("Profile", profile, Some(Meta::empty())))
}

pub async fn list_users(state: &AppState, admin: &AdminUser) -> AppResult<ApiResponse<UserList>> {
    tracing::debug!(admin_id = %admin.user().user_id, "listing users");
    let items = list_all(&state.orm).await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Users", UserList { items }, Some(meta)))
}
