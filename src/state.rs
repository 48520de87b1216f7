use crate::{
    db::OrmConn,
    security::{password::PasswordHasher, token::TokenService},
};

#[derive(Clone)]
pub struct AppState {
    pub orm: OrmConn,
    pub tokens: TokenService,
    pub hasher: PasswordHasher,
}

impl AppState {
    pub fn new(orm: OrmConn, jwt_secret: &str) -> Self {
        Self {
            orm,
            tokens: TokenService::new(jwt_secret),
            hasher: PasswordHasher::new(),
        }
    }
}
