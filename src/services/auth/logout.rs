use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::cache::session::end_session;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::activities::entities::ActivityType;
use crate::services::activities::log_activity;
use crate::services::client_ip;
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 处理用户登出
///
/// 删除会话活动时间戳，并通过空的 refresh_token cookie 清除客户端登录状态。
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let cache = service.get_cache(request)?;

    let claims = RequireJWT::bearer_token(request)
        .and_then(|token| JwtUtils::verify_access_token(token).ok())
        .or_else(|| {
            JwtUtils::extract_refresh_token_from_cookie(request)
                .and_then(|token| JwtUtils::verify_refresh_token(&token).ok())
        });

    if let Some(claims) = claims {
        end_session(cache.as_ref(), &claims.sid).await;
        if let Some(user_id) = claims.user_id() {
            cache
                .remove(&crate::middlewares::require_jwt::user_cache_key(user_id))
                .await;
            let storage = service.get_storage(request)?;
            log_activity(
                storage.as_ref(),
                Some(user_id),
                ActivityType::Logout,
                "User logged out",
                client_ip(request),
            )
            .await;
        }
    }

    // max_age=0 会让浏览器删除该 cookie
    let empty_cookie = JwtUtils::create_empty_refresh_token_cookie();

    Ok(HttpResponse::Ok()
        .cookie(empty_cookie)
        .json(ApiResponse::<()>::success_empty("Logout successful")))
}
