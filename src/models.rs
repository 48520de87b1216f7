use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{products, users};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    #[sea_orm(string_value = "user")]
    User,
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// A user as seen across the API boundary: never carries the password hash.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub cart: Vec<CartLine>,
}

impl UserProfile {
    pub fn from_entity(model: users::Model, cart: Vec<CartLine>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            role: model.role,
            created_at: model.created_at.with_timezone(&Utc),
            cart,
        }
    }
}

/// One cart entry; `product` is the internal product id, resolved only on view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CartLine {
    #[serde(rename = "product")]
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    #[serde(rename = "pID")]
    pub pid: i64,
    pub name: String,
    pub price: String,
    pub mf_date: Option<String>,
    pub exp_date: Option<String>,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            pid: model.pid,
            name: model.name,
            price: model.price,
            mf_date: model.mf_date,
            exp_date: model.exp_date,
            quantity: model.quantity,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

/// A cart entry with its product populated; `None` once the product is gone.
#[derive(Debug, Serialize, ToSchema)]
pub struct CartEntry {
    pub product: Option<Product>,
    pub quantity: i32,
}
