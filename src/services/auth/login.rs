use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use crate::cache::session::start_session;
use crate::cache::{CacheResult, ObjectCache};
use crate::models::activities::entities::ActivityType;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
};
use crate::services::activities::log_activity;
use crate::services::{client_ip, error_response};
use crate::utils::jwt;
use crate::utils::password::verify_password;

use super::AuthService;

/// 同一账号连续失败的上限
const MAX_FAILED_ATTEMPTS: u32 = 5;
/// 失败计数保留时间（秒）
const FAILED_ATTEMPT_WINDOW: u64 = 900;

fn failed_attempts_key(identifier: &str) -> String {
    format!("login_fail:{}", identifier.trim().to_lowercase())
}

async fn failed_attempts(cache: &dyn ObjectCache, identifier: &str) -> u32 {
    match cache.get_raw(&failed_attempts_key(identifier)).await {
        CacheResult::Found(raw) => raw.parse().unwrap_or(0),
        _ => 0,
    }
}

async fn record_failed_attempt(cache: &dyn ObjectCache, identifier: &str) {
    let count = failed_attempts(cache, identifier).await + 1;
    cache
        .insert_raw(
            failed_attempts_key(identifier),
            count.to_string(),
            FAILED_ATTEMPT_WINDOW,
        )
        .await;
}

fn auth_failed() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "Username or password is incorrect",
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let cache = service.get_cache(request)?;
    let config = service.get_config();
    let identifier = login_request.username.trim();

    // 1. 按账号限制连续失败次数（按 IP 的限制由 RateLimit 中间件负责）
    if failed_attempts(cache.as_ref(), identifier).await >= MAX_FAILED_ATTEMPTS {
        warn!("Too many failed login attempts for '{}'", identifier);
        return Ok(HttpResponse::TooManyRequests().json(ApiResponse::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many failed login attempts, please try again later",
        )));
    }

    // 2. 根据用户名或邮箱获取用户信息
    let user = match storage.get_user_by_username_or_email(identifier).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            record_failed_attempt(cache.as_ref(), identifier).await;
            return Ok(auth_failed());
        }
        Err(e) => return Ok(error_response("Login failed", e, ErrorCode::AuthFailed)),
    };

    // 3. 验证密码
    if !verify_password(&login_request.password, &user.password_hash) {
        record_failed_attempt(cache.as_ref(), identifier).await;
        return Ok(auth_failed());
    }

    if !user.is_active() {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "Account is not active",
        )));
    }

    cache.remove(&failed_attempts_key(identifier)).await;

    // 4. 更新最后登录时间
    if let Err(e) = storage.update_last_login(user.id).await {
        warn!("Failed to update last login for user {}: {}", user.id, e);
    }

    // 5. 生成令牌对并开启会话
    let token_pair = match user.generate_token_pair() {
        Ok(pair) => pair,
        Err(e) => {
            error!("Failed to generate JWT token: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            );
        }
    };

    let idle_seconds = config.session_idle_seconds();
    start_session(
        cache.as_ref(),
        &token_pair.sid,
        chrono::Utc::now().timestamp(),
        idle_seconds,
    )
    .await;

    log_activity(
        storage.as_ref(),
        Some(user.id),
        ActivityType::Login,
        format!("User {} logged in", user.username),
        client_ip(request),
    )
    .await;
    info!("User {} logged in successfully", user.username);

    let refresh_cookie = jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);
    let response = LoginResponse {
        access_token: token_pair.access_token,
        expires_in: config.jwt.access_token_expiry * 60,
        idle_timeout: idle_seconds,
        user,
        created_at: chrono::Utc::now(),
    };

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Login successful")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_attempts_key_is_case_insensitive() {
        assert_eq!(failed_attempts_key(" Admin "), failed_attempts_key("admin"));
    }
}
