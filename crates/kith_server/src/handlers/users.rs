//! User lifecycle endpoints

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use kith_core::{NewUser, UserAttribute};

use crate::error::ApiError;
use crate::models::{CreateUserRequest, FriendsResponse, UserResponse};
use crate::state::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = NewUser {
        username: req.username,
        age: req.age,
    };
    let id = state.users.create(user.clone()).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id,
            username: user.username,
            age: user.age,
            friends: Vec::new(),
        }),
    ))
}

pub async fn get_user_friends(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FriendsResponse>, ApiError> {
    let friends = state.users.friends_of(&id).await?;
    Ok(Json(FriendsResponse { id, friends }))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(attr): Json<UserAttribute>,
) -> Result<StatusCode, ApiError> {
    state.users.update_attribute(&id, attr).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.users.remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
