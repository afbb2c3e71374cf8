use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub enum AccountStatus {
    Active,
    Closed,
}

crate::models::string_enum!(AccountStatus {
    Active => "active",
    Closed => "closed",
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

crate::models::string_enum!(TransactionKind {
    Deposit => "deposit",
    Withdrawal => "withdrawal",
});

impl TransactionKind {
    /// 对余额的影响（存入为正，支取为负）
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            TransactionKind::Deposit => amount,
            TransactionKind::Withdrawal => -amount,
        }
    }
}

// 学生账户（学费、家长会费等），current_balance 为缓存余额
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct Account {
    pub id: i64,
    pub student_id: i64,
    pub account_type: String,
    #[ts(type = "string")]
    pub current_balance: Decimal,
    pub status: AccountStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct AccountTransaction {
    pub id: i64,
    pub account_id: i64,
    pub kind: TransactionKind,
    #[ts(type = "string")]
    pub amount: Decimal,
    #[ts(type = "string")]
    pub balance_after: Decimal,
    pub receipt_number: Option<String>,
    pub description: Option<String>,
    pub recorded_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 余额报表中的账户行
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct AccountLedgerRow {
    pub account_id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub admission_number: String,
    pub account_type: String,
    #[ts(type = "string")]
    pub current_balance: Decimal,
    #[ts(type = "string")]
    pub total_deposits: Decimal,
    #[ts(type = "string")]
    pub total_withdrawals: Decimal,
}
