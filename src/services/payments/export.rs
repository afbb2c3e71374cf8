//! 缴费记录导出（CSV）

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::error;

use super::PaymentService;
use super::list::check_date_range;
use crate::models::payments::entities::Payment;
use crate::models::payments::requests::{PaymentListParams, PaymentListQuery};
use crate::models::ErrorCode;
use crate::services::{bad_request, error_response};

pub(crate) const MAX_EXPORT_ROWS: usize = 10_000;

pub async fn export_payments(
    service: &PaymentService,
    query: PaymentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let list_query = PaymentListQuery::from(query);
    if let Err(msg) = check_date_range(&list_query) {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }

    let storage = service.get_storage(request)?;
    // 多取一条用于判断是否超限
    let payments = match storage
        .list_payments_for_export(list_query, MAX_EXPORT_ROWS as u64 + 1)
        .await
    {
        Ok(payments) => payments,
        Err(e) => {
            return Ok(error_response(
                "Failed to export payments",
                e,
                ErrorCode::ExportFailed,
            ));
        }
    };
    if let Err(msg) = check_export_size(payments.len()) {
        return Ok(bad_request(ErrorCode::ExportFailed, msg));
    }

    let data = payments_to_csv(&payments).map_err(|e| {
        error!("CSV 生成失败: {}", e);
        actix_web::error::ErrorInternalServerError("CSV export failed")
    })?;

    let filename = format!("payments_{}.csv", Utc::now().format("%Y%m%d_%H%M%S"));
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(data))
}

/// 超过上限时拒绝导出，而不是静默截断
pub(crate) fn check_export_size(rows: usize) -> Result<(), String> {
    if rows > MAX_EXPORT_ROWS {
        return Err(format!(
            "Export is limited to {MAX_EXPORT_ROWS} rows, narrow the filters"
        ));
    }
    Ok(())
}

pub(crate) fn payments_to_csv(payments: &[Payment]) -> Result<Vec<u8>, String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "receipt_number",
        "student_id",
        "amount",
        "method",
        "purpose",
        "term",
        "academic_year",
        "paid_on",
    ])
    .map_err(|e| e.to_string())?;

    for payment in payments {
        wtr.write_record([
            payment.receipt_number.clone(),
            payment.student_id.to_string(),
            format!("{:.2}", payment.amount),
            payment.method.to_string(),
            payment.purpose.clone(),
            payment.term.clone().unwrap_or_default(),
            payment.academic_year.clone().unwrap_or_default(),
            payment.paid_on.clone(),
        ])
        .map_err(|e| e.to_string())?;
    }

    wtr.into_inner().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::payments::entities::PaymentMethod;
    use rust_decimal::Decimal;

    #[test]
    fn test_payments_to_csv() {
        let payment = Payment {
            id: 1,
            student_id: 7,
            account_id: None,
            amount: Decimal::new(1205, 1),
            method: PaymentMethod::MobileMoney,
            purpose: "Tuition, Term 1".to_string(),
            receipt_number: "RCP-1-0001".to_string(),
            term: Some("Term 1".to_string()),
            academic_year: None,
            paid_on: "2025-09-01".to_string(),
            recorded_by: Some(1),
            created_at: chrono::Utc::now(),
        };
        let csv = String::from_utf8(payments_to_csv(&[payment]).unwrap()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("receipt_number,student_id,amount,method,purpose,term,academic_year,paid_on")
        );
        assert_eq!(
            lines.next(),
            Some("RCP-1-0001,7,120.50,mobile_money,\"Tuition, Term 1\",Term 1,,2025-09-01")
        );
    }

    #[test]
    fn test_check_export_size() {
        assert!(check_export_size(0).is_ok());
        assert!(check_export_size(MAX_EXPORT_ROWS).is_ok());
        let err = check_export_size(MAX_EXPORT_ROWS + 1).unwrap_err();
        assert!(err.contains("10000"));
    }
}
