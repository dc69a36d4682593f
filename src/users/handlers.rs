use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;

use crate::auth::dto::{LoginRequest, LoginResponse};
use crate::error::Error;
use crate::model::User;
use crate::response::{envelope, Envelope};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(register_user))
        .route("/users/viewAll", get(get_all_users))
        .route("/users/getByUserId/:user_id", get(get_user_by_id))
        .route("/users/updateUser", put(update_user))
        .route("/users/login", post(login))
        .route("/users/:email", get(get_user_by_email).delete(delete_user))
}

#[instrument(skip(state, user))]
async fn register_user(
    State(state): State<AppState>,
    Json(user): Json<User>,
) -> Result<(StatusCode, Json<Envelope<User>>), Error> {
    let user = state.users.create(user).await?;
    Ok(envelope("User created successfully", StatusCode::CREATED, user))
}

#[instrument(skip(state))]
async fn get_all_users(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Envelope<Vec<User>>>), Error> {
    let users = state.users.get_all().await?;
    Ok(envelope("Retrieved all users", StatusCode::OK, users))
}

#[instrument(skip(state))]
async fn get_user_by_id(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<(StatusCode, Json<Envelope<User>>), Error> {
    let user = state.users.get(user_id).await?;
    Ok(envelope("User retrieved successfully", StatusCode::OK, user))
}

#[instrument(skip(state))]
async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<(StatusCode, Json<Envelope<User>>), Error> {
    let user = state.users.get_by_email(&email).await?;
    Ok(envelope("User retrieved successfully", StatusCode::OK, user))
}

#[instrument(skip(state, user))]
async fn update_user(
    State(state): State<AppState>,
    Json(user): Json<User>,
) -> Result<(StatusCode, Json<Envelope<User>>), Error> {
    let user = state.users.update_by_email(user).await?;
    Ok(envelope("User updated successfully", StatusCode::OK, user))
}

#[instrument(skip(state))]
async fn delete_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<(StatusCode, Json<Envelope<User>>), Error> {
    let user = state.users.delete_by_email(&email).await?;
    Ok(envelope("User deleted successfully", StatusCode::OK, user))
}

/// Login is the one endpoint that skips the envelope: it returns the bare
/// composed map with 201.
#[instrument(skip(state, payload))]
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), Error> {
    let body = state.auth.login(&payload.email, &payload.password).await?;
    Ok((StatusCode::CREATED, Json(body)))
}
