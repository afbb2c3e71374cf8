use rust_decimal::Decimal;
use super::entities::{Account, AccountLedgerRow, AccountTransaction};
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct AccountListResponse {
    pub items: Vec<Account>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct TransactionListResponse {
    pub account: Account,
    pub items: Vec<AccountTransaction>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct RecordTransactionResponse {
    pub account: Account,
    pub transaction: AccountTransaction,
}

// 余额分桶汇总
#[derive(Debug, Clone, Default, Serialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct BalanceSummary {
    #[ts(type = "string")]
    pub positive_total: Decimal,
    pub positive_count: i64,
    #[ts(type = "string")]
    pub negative_total: Decimal,
    pub negative_count: i64,
    pub zero_count: i64,
    #[ts(type = "string")]
    pub net_total: Decimal,
    #[ts(type = "string")]
    pub total_deposits: Decimal,
    #[ts(type = "string")]
    pub total_withdrawals: Decimal,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct BalanceReportResponse {
    pub summary: BalanceSummary,
    pub accounts: Vec<AccountLedgerRow>,
}
