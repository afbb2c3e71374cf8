use rust_decimal::Decimal;
use super::entities::{AccountStatus, TransactionKind};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct CreateAccountRequest {
    pub student_id: i64,
    pub account_type: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct RecordTransactionRequest {
    pub kind: TransactionKind,
    #[ts(type = "string")]
    pub amount: Decimal,
    pub receipt_number: Option<String>,
    pub description: Option<String>,
}

/// 关闭或重新启用账户
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct UpdateAccountStatusRequest {
    pub status: AccountStatus,
}

// 账户筛选（HTTP 与存储层共用）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct AccountListQuery {
    pub student_id: Option<i64>,
    pub class_id: Option<i64>,
    pub account_type: Option<String>,
    pub status: Option<AccountStatus>,
    pub search: Option<String>,
}
