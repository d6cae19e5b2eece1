//! Authentication Handlers
//!
//! Handles registration, login and current-user lookup

use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode};

use crate::auth::{CurrentUser, credential};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PHONE_LEN, validate_email, validate_password, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::client::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use shared::models::User;
use shared::types::UserRole;

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

fn to_user_info(user: &User) -> UserInfo {
    UserInfo {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role,
    }
}

/// Shared registration path for both account roles
async fn register(
    state: &ServerState,
    req: RegisterRequest,
    role: UserRole,
) -> AppResult<UserInfo> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&req.phone, "phone", MAX_PHONE_LEN)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    let pool = state.pool();

    // Friendlier duplicate messages; the UNIQUE indexes remain the final
    // arbiter under concurrency
    if user::find_by_email(pool, &req.email).await?.is_some() {
        return Err(AppError::conflict("Email already registered"));
    }
    if user::find_by_phone(pool, &req.phone).await?.is_some() {
        return Err(AppError::conflict("Phone number already registered"));
    }

    let password_hash = credential::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let created = user::create(
        pool,
        req.name.trim(),
        &req.email,
        &req.phone,
        &password_hash,
        role,
    )
    .await?;

    tracing::info!(user_id = created.id, role = %role, "User registered");

    Ok(to_user_info(&created))
}

/// POST /api/auth/register/customer - 注册顾客账号
pub async fn register_customer(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserInfo>)> {
    let info = register(&state, req, UserRole::Customer).await?;
    Ok((StatusCode::CREATED, Json(info)))
}

/// POST /api/auth/register/business - 注册商家账号
pub async fn register_business(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserInfo>)> {
    let info = register(&state, req, UserRole::Business).await?;
    Ok((StatusCode::CREATED, Json(info)))
}

/// POST /api/auth/login - 登录
///
/// Authenticates credentials and returns a JWT token. The error message
/// never distinguishes unknown email from wrong password.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let pool = state.pool();

    let user = user::find_by_email(pool, &req.email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let user = match user {
        Some(u) => {
            let password_valid = credential::verify_password(&req.password, &u.password_hash)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

            if !password_valid {
                tracing::warn!(email = %req.email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            u
        }
        None => {
            tracing::warn!(email = %req.email, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let jwt_service = state.jwt_service();
    let token = jwt_service
        .generate_token(user.id, &user.name, &user.email, user.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;
    let claims = jwt_service
        .validate_token(&token)
        .map_err(|e| AppError::internal(format!("Failed to inspect token: {e}")))?;

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    Ok(Json(LoginResponse {
        expires_in: jwt_service.expiration_seconds(&claims),
        token,
        user: to_user_info(&user),
    }))
}

/// GET /api/auth/me - 当前用户信息
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<UserInfo>> {
    // Read fresh data; the token may carry a stale name
    let record = user::find_by_id(state.pool(), user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Account no longer exists"))?;
    Ok(Json(to_user_info(&record)))
}
