use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ActivityService;
use crate::models::activities::requests::{ActivityListParams, ActivityListQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn list_activities(
    service: &ActivityService,
    query: ActivityListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage
        .list_activities_with_pagination(ActivityListQuery::from(query))
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Activity log retrieved successfully",
        ))),
        Err(e) => Ok(error_response(
            "Failed to retrieve activity log",
            e,
            ErrorCode::NotFound,
        )),
    }
}
