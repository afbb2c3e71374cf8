use super::entities::Invoice;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/invoice.ts")]
pub struct InvoiceListResponse {
    pub items: Vec<Invoice>,
    pub pagination: PaginationInfo,
}
