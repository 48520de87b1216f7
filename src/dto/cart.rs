use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{CartEntry, CartLine};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    #[serde(rename = "pID")]
    pub pid: i64,
    /// Defaults to 1 when absent.
    #[serde(default)]
    pub quantity: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Cart {
    pub items: Vec<CartLine>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub items: Vec<CartEntry>,
}
