use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::students::responses::ClassRosterResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, not_found};

pub async fn get_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Class information retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => Ok(error_response(
            "Failed to get class information",
            e,
            ErrorCode::ClassNotFound,
        )),
    }
}

pub async fn list_class_students(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let class = match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => return Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => {
            return Ok(error_response(
                "Failed to get class information",
                e,
                ErrorCode::ClassNotFound,
            ));
        }
    };

    match storage.list_students_by_class(class_id).await {
        Ok(students) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassRosterResponse { class, students },
            "Class roster retrieved successfully",
        ))),
        Err(e) => Ok(error_response(
            "Failed to list class students",
            e,
            ErrorCode::ClassNotFound,
        )),
    }
}
