use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PaymentService;
use crate::models::payments::requests::{PaymentListParams, PaymentListQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, not_found};
use crate::utils::validate::parse_iso_date;

/// 校验日期区间参数
pub(crate) fn check_date_range(query: &PaymentListQuery) -> Result<(), String> {
    for date in [&query.date_from, &query.date_to].into_iter().flatten() {
        parse_iso_date(date)?;
    }
    Ok(())
}

pub async fn list_payments(
    service: &PaymentService,
    query: PaymentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let list_query = PaymentListQuery::from(query);
    if let Err(msg) = check_date_range(&list_query) {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }

    let storage = service.get_storage(request)?;
    match storage.list_payments_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Payment list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(
            "Failed to retrieve payments",
            e,
            ErrorCode::PaymentNotFound,
        )),
    }
}

pub async fn get_payment(
    service: &PaymentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_payment_by_id(id).await {
        Ok(Some(payment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            payment,
            "Payment retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::PaymentNotFound, "Payment not found")),
        Err(e) => Ok(error_response(
            "Failed to retrieve payment",
            e,
            ErrorCode::PaymentNotFound,
        )),
    }
}
