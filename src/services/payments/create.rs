use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PaymentService, generate_receipt_number};
use crate::errors::SchoolAdminError;
use crate::models::activities::entities::ActivityType;
use crate::models::payments::requests::{CreatePaymentRequest, NewPayment};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::activities::log_request_activity;
use crate::services::{bad_request, current_user, error_response};
use crate::utils::validate::{parse_iso_date, require_text, validate_amount};

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub async fn create_payment(
    service: &PaymentService,
    req: CreatePaymentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_amount(req.amount) {
        return Ok(bad_request(ErrorCode::TransactionInvalid, msg));
    }
    let purpose = match require_text("purpose", &req.purpose) {
        Ok(v) => v,
        Err(msg) => return Ok(bad_request(ErrorCode::BadRequest, msg)),
    };
    let paid_on = match trimmed(req.paid_on) {
        Some(date) => match parse_iso_date(&date) {
            Ok(date) => date.format("%Y-%m-%d").to_string(),
            Err(msg) => return Ok(bad_request(ErrorCode::BadRequest, msg)),
        },
        None => chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string(),
    };

    let storage = service.get_storage(request)?;

    let student = match storage.get_student_by_id(req.student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => return Ok(bad_request(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => {
            return Ok(error_response(
                "Failed to look up student",
                e,
                ErrorCode::StudentNotFound,
            ));
        }
    };

    let payment = NewPayment {
        student_id: student.id,
        account_id: req.account_id,
        amount: req.amount,
        method: req.method,
        purpose,
        receipt_number: trimmed(req.receipt_number).unwrap_or_else(generate_receipt_number),
        term: trimmed(req.term),
        academic_year: trimmed(req.academic_year),
        paid_on,
        recorded_by: Some(user.id),
    };

    match storage.create_payment(payment).await {
        Ok(payment) => {
            log_request_activity(
                storage.as_ref(),
                request,
                ActivityType::Create,
                format!(
                    "Recorded payment {} of {:.2} for {}",
                    payment.receipt_number,
                    payment.amount,
                    student.full_name()
                ),
            )
            .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                payment,
                "Payment recorded successfully",
            )))
        }
        // 账户不属于该学生或已关闭
        Err(SchoolAdminError::Validation(msg)) => {
            Ok(bad_request(ErrorCode::TransactionInvalid, msg))
        }
        Err(e) => Ok(error_response(
            "Recording payment failed",
            e,
            ErrorCode::AccountNotFound,
        )),
    }
}
