use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, load_weights};
use crate::models::activities::entities::ActivityType;
use crate::models::grades::entities::WeightConfig;
use crate::models::grades::requests::UpdateWeightsRequest;
use crate::models::grades::responses::WeightsResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::activities::log_request_activity;
use crate::services::{bad_request, current_user, error_response};

pub async fn get_weights(service: &GradeService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match load_weights(storage.as_ref()).await {
        Ok((weights, is_default)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            WeightsResponse {
                weights,
                is_default,
            },
            "Grade weights retrieved successfully",
        ))),
        Err(e) => Ok(error_response(
            "Failed to load grade weights",
            e,
            ErrorCode::NotFound,
        )),
    }
}

pub async fn update_weights(
    service: &GradeService,
    req: UpdateWeightsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let weights = WeightConfig::new(req.mid_weight, req.class_weight, req.exam_weight);
    if let Err(msg) = weights.validate() {
        return Ok(bad_request(ErrorCode::InvalidWeights, msg));
    }

    let storage = service.get_storage(request)?;
    match storage.save_grade_weights(weights, user.id).await {
        Ok(saved) => {
            log_request_activity(
                storage.as_ref(),
                request,
                ActivityType::Update,
                format!(
                    "Updated grade weights to {}/{}/{}",
                    saved.mid_weight, saved.class_weight, saved.exam_weight
                ),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                WeightsResponse {
                    weights: saved,
                    is_default: false,
                },
                "Grade weights updated successfully",
            )))
        }
        Err(e) => Ok(error_response(
            "Saving grade weights failed",
            e,
            ErrorCode::InvalidWeights,
        )),
    }
}
