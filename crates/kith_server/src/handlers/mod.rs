//! HTTP request handlers

use axum::{
    Router,
    routing::{get, patch, post},
};

pub mod friendships;
pub mod health;
pub mod users;

use crate::state::AppState;

/// Build all API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // User lifecycle
        .route("/users", post(users::create_user))
        .route(
            "/users/:id",
            patch(users::update_user).delete(users::delete_user),
        )
        .route("/users/:id/friends", get(users::get_user_friends))
        // Friendships
        .route("/friendships", post(friendships::make_friends))
}
