pub mod accounts;
pub mod activities;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod grades;
pub mod invoices;
pub mod marks;
pub mod payments;
pub mod students;
pub mod subjects;
pub mod system;
pub mod teachers;
pub mod users;

pub use accounts::AccountService;
pub use activities::ActivityService;
pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use classes::ClassService;
pub use grades::GradeService;
pub use invoices::InvoiceService;
pub use marks::MarkService;
pub use payments::PaymentService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use system::SystemService;
pub use teachers::TeacherService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, error::ErrorInternalServerError};
use std::sync::Arc;
use tracing::error;

use crate::cache::ObjectCache;
use crate::errors::SchoolAdminError;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 从 app data 获取存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            error!("Storage not found in app data");
            ErrorInternalServerError("storage unavailable")
        })
}

/// 从 app data 获取缓存实例
pub(crate) fn cache_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn ObjectCache>> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            error!("Cache not found in app data");
            ErrorInternalServerError("cache unavailable")
        })
}

/// 当前登录用户，路由必须挂载 RequireJWT
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))
    })
}

/// 客户端 IP（记录操作日志用）
pub(crate) fn client_ip(request: &HttpRequest) -> Option<String> {
    request
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string())
}

/// 把存储层错误转换为 HTTP 响应
///
/// 数据库错误只写日志，客户端拿到的是通用提示。
pub(crate) fn error_response(
    context: &str,
    err: SchoolAdminError,
    not_found: ErrorCode,
) -> HttpResponse {
    match err {
        SchoolAdminError::Conflict(msg) => {
            tracing::info!("{}: {}", context, msg);
            HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::Conflict,
                format!("{context}: record already exists"),
            ))
        }
        SchoolAdminError::Validation(msg) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)),
        SchoolAdminError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(not_found, msg))
        }
        SchoolAdminError::Authorization(msg) => {
            HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, msg))
        }
        other => {
            error!("{}: {}", context, other);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("{context}: internal server error"),
            ))
        }
    }
}

/// 400 响应
pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

/// 404 响应
pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_error_response_status_mapping() {
        let resp = error_response("create", SchoolAdminError::conflict("dup"), ErrorCode::NotFound);
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = error_response("x", SchoolAdminError::validation("bad"), ErrorCode::NotFound);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = error_response("x", SchoolAdminError::not_found("gone"), ErrorCode::StudentNotFound);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = error_response(
            "x",
            SchoolAdminError::database_operation("driver detail"),
            ErrorCode::NotFound,
        );
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
