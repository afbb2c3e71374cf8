use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::activities::entities::ActivityType;
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::models::subjects::responses::SubjectListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::activities::log_request_activity;
use crate::services::{bad_request, error_response, not_found};
use crate::storage::Storage;
use crate::utils::validate::require_text;

/// 未填写学分时的默认值
const DEFAULT_CREDITS: f64 = 1.0;

pub struct SubjectService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubjectService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_subjects(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;

        match storage.list_subjects().await {
            Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                SubjectListResponse { items },
                "Subject list retrieved successfully",
            ))),
            Err(e) => Ok(error_response(
                "Failed to retrieve subjects",
                e,
                ErrorCode::SubjectNotFound,
            )),
        }
    }

    pub async fn create_subject(
        &self,
        mut req: CreateSubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match require_text("name", &req.name) {
            Ok(v) => req.name = v,
            Err(msg) => return Ok(bad_request(ErrorCode::BadRequest, msg)),
        }
        match require_text("code", &req.code) {
            Ok(v) => req.code = v.to_uppercase(),
            Err(msg) => return Ok(bad_request(ErrorCode::BadRequest, msg)),
        }
        let credits = req.credits.unwrap_or(DEFAULT_CREDITS);
        if !credits.is_finite() || credits <= 0.0 {
            return Ok(bad_request(
                ErrorCode::BadRequest,
                "credits must be greater than 0",
            ));
        }
        req.credits = Some(credits);

        let storage = self.get_storage(request)?;
        match storage.create_subject(req).await {
            Ok(subject) => {
                log_request_activity(
                    storage.as_ref(),
                    request,
                    ActivityType::Create,
                    format!("Created subject {} ({})", subject.name, subject.code),
                )
                .await;
                Ok(HttpResponse::Created().json(ApiResponse::success(
                    subject,
                    "Subject created successfully",
                )))
            }
            Err(e) => Ok(error_response(
                "Subject creation failed",
                e,
                ErrorCode::SubjectNotFound,
            )),
        }
    }

    pub async fn delete_subject(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;

        match storage.delete_subject(id).await {
            Ok(true) => {
                log_request_activity(
                    storage.as_ref(),
                    request,
                    ActivityType::Delete,
                    format!("Deleted subject #{id}"),
                )
                .await;
                Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Subject deleted successfully")))
            }
            Ok(false) => Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
            Err(e) => Ok(error_response(
                "Subject deletion failed",
                e,
                ErrorCode::SubjectNotFound,
            )),
        }
    }
}
