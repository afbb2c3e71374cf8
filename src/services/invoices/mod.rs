pub mod create;
pub mod manage;
pub mod print;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::invoices::requests::{
    CreateInvoiceRequest, InvoiceListParams, UpdateInvoiceStatusRequest,
};
use crate::storage::Storage;

pub struct InvoiceService {
    storage: Option<Arc<dyn Storage>>,
}

impl InvoiceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn create_invoice(
        &self,
        req: CreateInvoiceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_invoice(self, req, request).await
    }

    pub async fn get_invoice(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        manage::get_invoice(self, id, request).await
    }

    pub async fn list_invoices(
        &self,
        query: InvoiceListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::list_invoices(self, query, request).await
    }

    pub async fn update_invoice_status(
        &self,
        id: i64,
        req: UpdateInvoiceStatusRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_invoice_status(self, id, req, request).await
    }

    pub async fn delete_invoice(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        manage::delete_invoice(self, id, request).await
    }

    // 可打印的 HTML 发票
    pub async fn print_invoice(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        print::print_invoice(self, id, request).await
    }
}
