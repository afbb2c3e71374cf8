use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use crate::cache::session::{SessionState, touch_session};
use crate::middlewares::require_jwt::RequireJWT;
use crate::models::auth::responses::{RefreshTokenResponse, UserInfoResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt;

use super::AuthService;

fn reject(code: ErrorCode, message: &str) -> HttpResponse {
    // 清除无效的 refresh token cookie
    let empty_cookie = jwt::JwtUtils::create_empty_refresh_token_cookie();
    HttpResponse::Unauthorized()
        .cookie(empty_cookie)
        .json(ApiResponse::error_empty(code, message))
}

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    let Some(refresh_token) = jwt::JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let (access_token, claims) = match jwt::JwtUtils::refresh_access_token(&refresh_token) {
        Ok(result) => result,
        Err(e) => {
            info!("Refresh token rejected: {}", e);
            return Ok(reject(
                ErrorCode::Unauthorized,
                "Login expired or invalid, please login again",
            ));
        }
    };

    // 刷新也受无操作超时约束
    let cache = service.get_cache(request)?;
    match touch_session(
        cache.as_ref(),
        &claims.sid,
        chrono::Utc::now().timestamp(),
        config.session_idle_seconds(),
    )
    .await
    {
        SessionState::Active => {}
        SessionState::Expired => {
            return Ok(reject(
                ErrorCode::SessionExpired,
                "Session expired due to inactivity, please log in again",
            ));
        }
        SessionState::Unknown => warn!("Session store unavailable during token refresh"),
    }

    // 账号被停用后不再续签
    let storage = service.get_storage(request)?;
    let active = match claims.user_id() {
        Some(id) => matches!(storage.get_user_by_id(id).await, Ok(Some(user)) if user.is_active()),
        None => false,
    };
    if !active {
        return Ok(reject(ErrorCode::Unauthorized, "User is not active"));
    }

    let response = RefreshTokenResponse {
        access_token,
        expires_in: config.jwt.access_token_expiry * 60,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Token refreshed successfully",
    )))
}

pub async fn handle_get_user(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_user_claims(request) {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user },
            "User information retrieved successfully",
        ))),
        None => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))),
    }
}
