use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::activities::entities::ActivityType;
use crate::models::teachers::requests::{CreateTeacherRequest, UpdateTeacherRequest};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::activities::log_request_activity;
use crate::services::{bad_request, error_response, not_found};
use crate::utils::validate::require_text;

pub async fn create_teacher(
    service: &TeacherService,
    mut req: CreateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    req.staff_number = match require_text("staff_number", &req.staff_number) {
        Ok(v) => v,
        Err(msg) => return Ok(bad_request(ErrorCode::BadRequest, msg)),
    };
    req.full_name = match require_text("full_name", &req.full_name) {
        Ok(v) => v,
        Err(msg) => return Ok(bad_request(ErrorCode::BadRequest, msg)),
    };

    let storage = service.get_storage(request)?;

    // 档案只能挂在教师角色的账号上
    match storage.get_user_by_id(req.user_id).await {
        Ok(Some(user)) if user.role == UserRole::Teacher => {}
        Ok(Some(_)) => {
            return Ok(bad_request(
                ErrorCode::BadRequest,
                "Teacher profiles can only be attached to teacher accounts",
            ));
        }
        Ok(None) => return Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => {
            return Ok(error_response(
                "Failed to create teacher",
                e,
                ErrorCode::UserNotFound,
            ));
        }
    }

    match storage.create_teacher(req).await {
        Ok(teacher) => {
            log_request_activity(
                storage.as_ref(),
                request,
                ActivityType::Create,
                format!("Created teacher profile {} ({})", teacher.full_name, teacher.staff_number),
            )
            .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                teacher,
                "Teacher created successfully",
            )))
        }
        Err(e) => Ok(error_response(
            "Failed to create teacher",
            e,
            ErrorCode::TeacherNotFound,
        )),
    }
}

pub async fn update_teacher(
    service: &TeacherService,
    id: i64,
    req: UpdateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.update_teacher(id, req).await {
        Ok(Some(teacher)) => {
            log_request_activity(
                storage.as_ref(),
                request,
                ActivityType::Update,
                format!("Updated teacher profile {}", teacher.staff_number),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                teacher,
                "Teacher updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::TeacherNotFound, "Teacher not found")),
        Err(e) => Ok(error_response(
            "Failed to update teacher",
            e,
            ErrorCode::TeacherNotFound,
        )),
    }
}

pub async fn delete_teacher(
    service: &TeacherService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_teacher(id).await {
        Ok(true) => {
            log_request_activity(
                storage.as_ref(),
                request,
                ActivityType::Delete,
                format!("Deleted teacher profile #{id}"),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Teacher deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::TeacherNotFound, "Teacher not found")),
        Err(e) => Ok(error_response(
            "Failed to delete teacher",
            e,
            ErrorCode::TeacherNotFound,
        )),
    }
}
