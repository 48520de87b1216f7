use serde::Serialize;
use utoipa::ToSchema;

use crate::models::UserProfile;

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct UserList {
    #[schema(value_type = Vec<UserProfile>)]
    pub items: Vec<UserProfile>,
}
