use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AccountService;
use crate::models::accounts::requests::{
    AccountListQuery, CreateAccountRequest, UpdateAccountStatusRequest,
};
use crate::models::accounts::responses::AccountListResponse;
use crate::models::activities::entities::ActivityType;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::activities::log_request_activity;
use crate::services::{bad_request, error_response, not_found};
use crate::utils::validate::require_text;

pub async fn create_account(
    service: &AccountService,
    mut req: CreateAccountRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match require_text("account_type", &req.account_type) {
        Ok(v) => req.account_type = v,
        Err(msg) => return Ok(bad_request(ErrorCode::BadRequest, msg)),
    }

    let storage = service.get_storage(request)?;

    match storage.get_student_by_id(req.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(bad_request(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => {
            return Ok(error_response(
                "Failed to look up student",
                e,
                ErrorCode::StudentNotFound,
            ));
        }
    }

    match storage.create_account(req).await {
        Ok(account) => {
            log_request_activity(
                storage.as_ref(),
                request,
                ActivityType::Create,
                format!(
                    "Opened {} account #{} for student #{}",
                    account.account_type, account.id, account.student_id
                ),
            )
            .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                account,
                "Account created successfully",
            )))
        }
        Err(e) => Ok(error_response(
            "Account creation failed",
            e,
            ErrorCode::AccountNotFound,
        )),
    }
}

pub async fn list_accounts(
    service: &AccountService,
    query: AccountListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_accounts(query).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AccountListResponse { items },
            "Account list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(
            "Failed to retrieve accounts",
            e,
            ErrorCode::AccountNotFound,
        )),
    }
}

pub async fn get_account(
    service: &AccountService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_account_by_id(id).await {
        Ok(Some(account)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            account,
            "Account retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::AccountNotFound, "Account not found")),
        Err(e) => Ok(error_response(
            "Failed to retrieve account",
            e,
            ErrorCode::AccountNotFound,
        )),
    }
}

/// 关闭账户后拒绝新的流水，余额保留在报表中
pub async fn update_account_status(
    service: &AccountService,
    id: i64,
    req: UpdateAccountStatusRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.update_account_status(id, req.status).await {
        Ok(Some(account)) => {
            log_request_activity(
                storage.as_ref(),
                request,
                ActivityType::Update,
                format!("Set account #{} status to {}", account.id, account.status),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                account,
                "Account status updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::AccountNotFound, "Account not found")),
        Err(e) => Ok(error_response(
            "Failed to update account status",
            e,
            ErrorCode::AccountNotFound,
        )),
    }
}
