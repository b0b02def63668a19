use crate::{
    error::Result,
    extractors::ValidatedJson,
    models::{Credentials, LoginResponse, RegisterResponse},
    users::UserRepositoryTrait,
    AppState,
};
use axum::{extract::State, routing::post, Json, Router};
use tracing::info;

pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(credentials): ValidatedJson<Credentials>,
) -> Result<Json<RegisterResponse>> {
    info!("POST /register - username: {}", credentials.username);

    let username = state
        .users
        .register(&credentials.username, &credentials.password)
        .await?;
    Ok(Json(RegisterResponse::new(username)))
}

pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(credentials): ValidatedJson<Credentials>,
) -> Result<Json<LoginResponse>> {
    info!("POST /login - username: {}", credentials.username);

    let username = state
        .users
        .authenticate(&credentials.username, &credentials.password)
        .await?;
    Ok(Json(LoginResponse::new(username)))
}

pub fn create_user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
}
