//! Account and session API endpoints

use api_types::auth::{LoginRequest, LoginResponse, RegisterNew, UserView};
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{ServerError, server::ServerState};

fn user_view(user: engine::User) -> UserView {
    UserView {
        id: user.id,
        email: user.email,
        display_name: user.display_name,
        created_at: user.created_at,
    }
}

pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterNew>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    let user = state
        .engine
        .register(engine::RegisterCmd {
            email: payload.email,
            display_name: payload.display_name,
            password: payload.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user_view(user))))
}

pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ServerError> {
    let (token, user) = state.engine.login(&payload.email, &payload.password).await?;

    Ok(Json(LoginResponse {
        token,
        user: user_view(user),
    }))
}

pub async fn logout(
    TypedHeader(bearer): TypedHeader<Authorization<Bearer>>,
    State(state): State<ServerState>,
) -> Result<StatusCode, ServerError> {
    state.engine.logout(bearer.token()).await?;

    Ok(StatusCode::NO_CONTENT)
}
