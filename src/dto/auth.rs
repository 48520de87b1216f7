use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Role;

#[derive(Deserialize, Debug, ToSchema)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: String,
    #[serde(deserialize_with = "super::text_from_any")]
    #[schema(value_type = String)]
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    #[serde(deserialize_with = "super::text_from_any")]
    #[schema(value_type = String)]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}
