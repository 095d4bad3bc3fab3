use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::models::{EmailRequest, LoginRequest, User, UserInput, UserRecord};
use crate::{ApiFailure, Db};

pub(crate) fn routes() -> Router<Db> {
    Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/users/forgot-password", post(forgot_password))
        .route("/users/{user_id}", get(get_user).put(update_user))
        .route("/users/{user_id}/{password}", post(change_password))
}

async fn register(
    State(db): State<Db>,
    Json(input): Json<UserInput>,
) -> Result<(StatusCode, Json<User>), ApiFailure> {
    let email = input
        .email
        .clone()
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| ApiFailure::bad_request("email: must not be blank"))?;
    let password = input
        .password
        .clone()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiFailure::bad_request("password: must not be blank"))?;

    let mut store = db.write().await;
    if store.users.values().any(|r| r.user.email == email) {
        return Err(ApiFailure::conflict(format!("email {email} is already registered")));
    }
    let mut user = User {
        user_id: store.next_id(),
        email,
        role: input.role.clone().unwrap_or_else(|| "USER".to_string()),
        ..User::default()
    };
    input.apply_profile(&mut user);
    store.users.insert(
        user.user_id,
        UserRecord {
            user: user.clone(),
            password,
        },
    );
    tracing::info!(user_id = user.user_id, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}

async fn login(
    State(db): State<Db>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<User>, ApiFailure> {
    let store = db.read().await;
    store
        .users
        .values()
        .find(|r| r.user.email == input.email && r.password == input.password)
        .map(|r| Json(r.user.clone()))
        .ok_or_else(|| {
            tracing::warn!(email = %input.email, "rejected login");
            ApiFailure::unauthorized("invalid email or password")
        })
}

async fn forgot_password(
    State(db): State<Db>,
    Json(input): Json<EmailRequest>,
) -> Result<Json<User>, ApiFailure> {
    let store = db.read().await;
    store
        .users
        .values()
        .find(|r| r.user.email == input.email)
        .map(|r| Json(r.user.clone()))
        .ok_or_else(|| ApiFailure::not_found("User", input.email))
}

async fn get_user(
    State(db): State<Db>,
    Path(user_id): Path<u64>,
) -> Result<Json<User>, ApiFailure> {
    let store = db.read().await;
    store
        .users
        .get(&user_id)
        .map(|r| Json(r.user.clone()))
        .ok_or_else(|| ApiFailure::not_found("User", user_id))
}

/// Profile fields only; email, password and role are not changed here.
async fn update_user(
    State(db): State<Db>,
    Path(user_id): Path<u64>,
    Json(input): Json<UserInput>,
) -> Result<Json<User>, ApiFailure> {
    let mut store = db.write().await;
    let record = store
        .users
        .get_mut(&user_id)
        .ok_or_else(|| ApiFailure::not_found("User", user_id))?;
    input.apply_profile(&mut record.user);
    Ok(Json(record.user.clone()))
}

async fn change_password(
    State(db): State<Db>,
    Path((user_id, password)): Path<(u64, String)>,
) -> Result<Json<User>, ApiFailure> {
    let mut store = db.write().await;
    let record = store
        .users
        .get_mut(&user_id)
        .ok_or_else(|| ApiFailure::not_found("User", user_id))?;
    record.password = password;
    tracing::info!(user_id, "password changed");
    Ok(Json(record.user.clone()))
}
