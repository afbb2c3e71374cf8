use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Datelike;

use super::InvoiceService;
use crate::errors::SchoolAdminError;
use crate::models::activities::entities::ActivityType;
use crate::models::invoices::entities::{Invoice, InvoiceItem};
use crate::models::invoices::requests::{CreateInvoiceRequest, NewInvoice};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::activities::log_request_activity;
use crate::services::{bad_request, current_user, error_response};
use crate::utils::validate::{parse_iso_date, require_text, validate_amount};

/// 校验并整理发票条目
pub(crate) fn clean_items(items: Vec<InvoiceItem>) -> Result<Vec<InvoiceItem>, String> {
    if items.is_empty() {
        return Err("An invoice needs at least one item".to_string());
    }
    items
        .into_iter()
        .map(|item| {
            let description = require_text("description", &item.description)?;
            validate_amount(item.amount).map_err(|msg| format!("{description}: {msg}"))?;
            Ok(InvoiceItem {
                description,
                amount: item.amount,
            })
        })
        .collect()
}

pub async fn create_invoice(
    service: &InvoiceService,
    req: CreateInvoiceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let items = match clean_items(req.items) {
        Ok(items) => items,
        Err(msg) => return Ok(bad_request(ErrorCode::BadRequest, msg)),
    };
    let term = match require_text("term", &req.term) {
        Ok(v) => v,
        Err(msg) => return Ok(bad_request(ErrorCode::BadRequest, msg)),
    };
    let academic_year = match require_text("academic_year", &req.academic_year) {
        Ok(v) => v,
        Err(msg) => return Ok(bad_request(ErrorCode::BadRequest, msg)),
    };
    let due_date = match req.due_date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(date) => match parse_iso_date(date) {
            Ok(date) => Some(date.format("%Y-%m-%d").to_string()),
            Err(msg) => return Ok(bad_request(ErrorCode::BadRequest, msg)),
        },
        None => None,
    };

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

    let invoice = NewInvoice {
        student_id: req.student_id,
        term,
        academic_year,
        total_amount: Invoice::items_total(&items),
        items,
        due_date,
        notes: req.notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
        created_by: Some(user.id),
        year: chrono::Utc::now().year(),
    };

    match storage.create_invoice(invoice).await {
        Ok(invoice) => {
            log_request_activity(
                storage.as_ref(),
                request,
                ActivityType::Create,
                format!(
                    "Created invoice {} ({:.2}) for student #{}",
                    invoice.invoice_number, invoice.total_amount, invoice.student_id
                ),
            )
            .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                invoice,
                "Invoice created successfully",
            )))
        }
        Err(SchoolAdminError::Conflict(msg)) => {
            tracing::error!("Invoice numbering exhausted: {}", msg);
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::InvoiceNumberExhausted,
                "Could not allocate an invoice number, please retry",
            )))
        }
        Err(e) => Ok(error_response(
            "Invoice creation failed",
            e,
            ErrorCode::InvoiceNotFound,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn item(description: &str, amount: i64) -> InvoiceItem {
        InvoiceItem {
            description: description.to_string(),
            amount: Decimal::new(amount, 0),
        }
    }

    #[test]
    fn test_clean_items() {
        let items = clean_items(vec![item(" Tuition ", 300), item("PTA", 20)]).unwrap();
        assert_eq!(items[0].description, "Tuition");
        assert_eq!(Invoice::items_total(&items), Decimal::new(320, 0));

        assert!(clean_items(vec![]).is_err());
        assert!(clean_items(vec![item("", 10)]).is_err());
        assert!(clean_items(vec![item("Books", 0)]).is_err());
    }
}
