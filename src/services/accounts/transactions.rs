use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AccountService;
use crate::errors::SchoolAdminError;
use crate::models::accounts::requests::RecordTransactionRequest;
use crate::models::accounts::responses::{RecordTransactionResponse, TransactionListResponse};
use crate::models::activities::entities::ActivityType;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::activities::log_request_activity;
use crate::services::{bad_request, current_user, error_response, not_found};
use crate::utils::validate::validate_amount;

/// 记录存取款；支取可以透支，负余额只在报表中体现
pub async fn record_transaction(
    service: &AccountService,
    account_id: i64,
    mut req: RecordTransactionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_amount(req.amount) {
        return Ok(bad_request(ErrorCode::TransactionInvalid, msg));
    }
    req.receipt_number = req
        .receipt_number
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());

    let storage = service.get_storage(request)?;

    match storage.record_transaction(account_id, req, user.id).await {
        Ok((account, transaction)) => {
            log_request_activity(
                storage.as_ref(),
                request,
                ActivityType::Create,
                format!(
                    "Recorded {} of {:.2} on account #{}",
                    transaction.kind, transaction.amount, account.id
                ),
            )
            .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                RecordTransactionResponse {
                    account,
                    transaction,
                },
                "Transaction recorded successfully",
            )))
        }
        // 账户已关闭等业务校验在锁定账户行后由存储层给出
        Err(SchoolAdminError::Validation(msg)) => {
            Ok(bad_request(ErrorCode::TransactionInvalid, msg))
        }
        Err(e) => Ok(error_response(
            "Recording transaction failed",
            e,
            ErrorCode::AccountNotFound,
        )),
    }
}

pub async fn list_transactions(
    service: &AccountService,
    account_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let account = match storage.get_account_by_id(account_id).await {
        Ok(Some(account)) => account,
        Ok(None) => return Ok(not_found(ErrorCode::AccountNotFound, "Account not found")),
        Err(e) => {
            return Ok(error_response(
                "Failed to look up account",
                e,
                ErrorCode::AccountNotFound,
            ));
        }
    };

    match storage.list_account_transactions(account_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TransactionListResponse { account, items },
            "Transactions retrieved successfully",
        ))),
        Err(e) => Ok(error_response(
            "Failed to retrieve transactions",
            e,
            ErrorCode::AccountNotFound,
        )),
    }
}
