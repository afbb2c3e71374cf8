//! 路径参数提取器
//!
//! 路径中的 ID 必须是正整数，否则直接返回 400 JSON 错误，
//! 处理程序拿到的值总是合法的。

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError, http::StatusCode,
};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn invalid_path_param(name: &str, raw: Option<&str>) -> actix_web::Error {
    let message = match raw {
        Some(value) => format!("Invalid path parameter '{name}': '{value}'"),
        None => format!("Missing path parameter '{name}'"),
    };
    let response = HttpResponse::build(StatusCode::BAD_REQUEST)
        .json(ApiResponse::error_empty(ErrorCode::BadRequest, message.clone()));
    InternalError::from_response(message, response).into()
}

/// 解析正整数 ID
pub fn parse_positive_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

macro_rules! safe_id_extractor {
    ($(#[$doc:meta])* $name:ident, $param:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                let raw = req.match_info().get($param);
                ready(
                    raw.and_then(parse_positive_id)
                        .map($name)
                        .ok_or_else(|| invalid_path_param($param, raw)),
                )
            }
        }
    };
}

safe_id_extractor!(
    /// `{id}`
    SafeIDI64,
    "id"
);
safe_id_extractor!(SafeStudentIdI64, "student_id");
safe_id_extractor!(SafeClassIdI64, "class_id");

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_parse_positive_id() {
        assert_eq!(parse_positive_id("42"), Some(42));
        assert_eq!(parse_positive_id("0"), None);
        assert_eq!(parse_positive_id("-3"), None);
        assert_eq!(parse_positive_id("abc"), None);
    }

    #[actix_web::test]
    async fn test_extract_from_match_info() {
        let req = TestRequest::default()
            .param("student_id", "7")
            .to_http_request();
        let id = SafeStudentIdI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 7);

        let req = TestRequest::default().param("id", "x1").to_http_request();
        assert!(SafeIDI64::extract(&req).await.is_err());
    }
}
