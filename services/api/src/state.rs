//! Application state shared across handlers

use sqlx::PgPool;

use crate::{
    jwt::JwtService,
    repositories::{ContactRepository, EventRepository, UserRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: JwtService,
    pub user_repository: UserRepository,
    pub event_repository: EventRepository,
    pub contact_repository: ContactRepository,
}
