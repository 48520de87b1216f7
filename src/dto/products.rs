use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Product;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[serde(rename = "pID")]
    pub pid: i64,
    pub name: String,
    #[serde(deserialize_with = "super::text_from_any")]
    #[schema(value_type = String)]
    pub price: String,
    pub mf_date: Option<String>,
    pub exp_date: Option<String>,
    pub quantity: i32,
}

/// Partial update; the pID itself is immutable.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::optional_text_from_any")]
    #[schema(value_type = Option<String>)]
    pub price: Option<String>,
    pub mf_date: Option<String>,
    pub exp_date: Option<String>,
    pub quantity: Option<i32>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedProduct {
    #[serde(rename = "pID")]
    pub pid: i64,
}
