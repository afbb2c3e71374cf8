use rust_decimal::Decimal;
use super::entities::{InvoiceItem, InvoiceStatus};
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/invoice.ts")]
pub struct CreateInvoiceRequest {
    pub student_id: i64,
    pub term: String,
    pub academic_year: String,
    pub items: Vec<InvoiceItem>,
    pub due_date: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/invoice.ts")]
pub struct UpdateInvoiceStatusRequest {
    pub status: InvoiceStatus,
}

// 发票查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/invoice.ts")]
pub struct InvoiceListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<InvoiceStatus>,
    pub term: Option<String>,
    pub academic_year: Option<String>,
    #[serde(default, deserialize_with = "crate::models::common::optional_i64")]
    pub class_id: Option<i64>,
    #[serde(default, deserialize_with = "crate::models::common::optional_i64")]
    pub student_id: Option<i64>,
}

// 发票列表查询参数（用于存储层）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/invoice.ts")]
pub struct InvoiceListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<InvoiceStatus>,
    pub term: Option<String>,
    pub academic_year: Option<String>,
    pub class_id: Option<i64>,
    pub student_id: Option<i64>,
}

impl From<InvoiceListParams> for InvoiceListQuery {
    fn from(params: InvoiceListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            status: params.status,
            term: params.term,
            academic_year: params.academic_year,
            class_id: params.class_id,
            student_id: params.student_id,
        }
    }
}

// 新建发票（存储层），发票号由存储层分配
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub student_id: i64,
    pub term: String,
    pub academic_year: String,
    pub items: Vec<InvoiceItem>,
    pub total_amount: Decimal,
    pub due_date: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<i64>,
    // 发票号中的年份
    pub year: i32,
}
