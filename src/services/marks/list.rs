use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MarkService;
use crate::models::activities::entities::ActivityType;
use crate::models::marks::requests::MarkListQuery;
use crate::models::marks::responses::MarkListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::activities::log_request_activity;
use crate::services::{error_response, not_found};

pub async fn list_marks(
    service: &MarkService,
    query: MarkListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_marks(query).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MarkListResponse { items },
            "Marks retrieved successfully",
        ))),
        Err(e) => Ok(error_response(
            "Failed to retrieve marks",
            e,
            ErrorCode::StudentNotFound,
        )),
    }
}

pub async fn delete_mark(
    service: &MarkService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_mark(id).await {
        Ok(true) => {
            log_request_activity(
                storage.as_ref(),
                request,
                ActivityType::Delete,
                format!("Deleted mark #{id}"),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Mark deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::NotFound, "Mark not found")),
        Err(e) => Ok(error_response("Mark deletion failed", e, ErrorCode::NotFound)),
    }
}
