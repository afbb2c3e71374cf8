use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::InvoiceService;
use crate::models::activities::entities::ActivityType;
use crate::models::invoices::requests::{
    InvoiceListParams, InvoiceListQuery, UpdateInvoiceStatusRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::activities::log_request_activity;
use crate::services::{error_response, not_found};

pub async fn get_invoice(
    service: &InvoiceService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_invoice_by_id(id).await {
        Ok(Some(invoice)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            invoice,
            "Invoice retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::InvoiceNotFound, "Invoice not found")),
        Err(e) => Ok(error_response(
            "Failed to retrieve invoice",
            e,
            ErrorCode::InvoiceNotFound,
        )),
    }
}

pub async fn list_invoices(
    service: &InvoiceService,
    query: InvoiceListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage
        .list_invoices_with_pagination(InvoiceListQuery::from(query))
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Invoice list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(
            "Failed to retrieve invoices",
            e,
            ErrorCode::InvoiceNotFound,
        )),
    }
}

pub async fn update_invoice_status(
    service: &InvoiceService,
    id: i64,
    req: UpdateInvoiceStatusRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.update_invoice_status(id, req.status).await {
        Ok(Some(invoice)) => {
            log_request_activity(
                storage.as_ref(),
                request,
                ActivityType::Update,
                format!(
                    "Marked invoice {} as {}",
                    invoice.invoice_number, invoice.status
                ),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                invoice,
                "Invoice status updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::InvoiceNotFound, "Invoice not found")),
        Err(e) => Ok(error_response(
            "Invoice update failed",
            e,
            ErrorCode::InvoiceNotFound,
        )),
    }
}

pub async fn delete_invoice(
    service: &InvoiceService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_invoice(id).await {
        Ok(true) => {
            log_request_activity(
                storage.as_ref(),
                request,
                ActivityType::Delete,
                format!("Deleted invoice #{id}"),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Invoice deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::InvoiceNotFound, "Invoice not found")),
        Err(e) => Ok(error_response(
            "Invoice deletion failed",
            e,
            ErrorCode::InvoiceNotFound,
        )),
    }
}
