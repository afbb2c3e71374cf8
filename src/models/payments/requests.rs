use rust_decimal::Decimal;
use super::entities::PaymentMethod;
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct CreatePaymentRequest {
    pub student_id: i64,
    pub account_id: Option<i64>,
    #[ts(type = "string")]
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub purpose: String,
    // 不填时自动生成
    pub receipt_number: Option<String>,
    pub term: Option<String>,
    pub academic_year: Option<String>,
    // 不填时为当天
    pub paid_on: Option<String>,
}

// 缴费查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct PaymentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "crate::models::common::optional_i64")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "crate::models::common::optional_i64")]
    pub class_id: Option<i64>,
    pub method: Option<PaymentMethod>,
    pub term: Option<String>,
    pub academic_year: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

// 缴费列表查询参数（用于存储层）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct PaymentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub class_id: Option<i64>,
    pub method: Option<PaymentMethod>,
    pub term: Option<String>,
    pub academic_year: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl From<PaymentListParams> for PaymentListQuery {
    fn from(params: PaymentListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            student_id: params.student_id,
            class_id: params.class_id,
            method: params.method,
            term: params.term,
            academic_year: params.academic_year,
            date_from: params.date_from,
            date_to: params.date_to,
        }
    }
}

// 新建缴费记录（存储层），收据号与日期已确定
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub student_id: i64,
    pub account_id: Option<i64>,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub purpose: String,
    pub receipt_number: String,
    pub term: Option<String>,
    pub academic_year: Option<String>,
    pub paid_on: String,
    pub recorded_by: Option<i64>,
}
