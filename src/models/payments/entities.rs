use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 支付方式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub enum PaymentMethod {
    Cash,
    Bank,
    MobileMoney,
    Cheque,
}

crate::models::string_enum!(PaymentMethod {
    Cash => "cash",
    Bank => "bank",
    MobileMoney => "mobile_money",
    Cheque => "cheque",
});

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct Payment {
    pub id: i64,
    pub student_id: i64,
    // 入账账户，可为空
    pub account_id: Option<i64>,
    #[ts(type = "string")]
    pub amount: Decimal,
    pub method: PaymentMethod,
    // 缴费项目，如 "Tuition"、"PTA"
    pub purpose: String,
    pub receipt_number: String,
    pub term: Option<String>,
    pub academic_year: Option<String>,
    // YYYY-MM-DD
    pub paid_on: String,
    pub recorded_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
