use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AccountService;
use crate::models::accounts::entities::AccountLedgerRow;
use crate::models::accounts::requests::AccountListQuery;
use crate::models::accounts::responses::{BalanceReportResponse, BalanceSummary};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

/// 按余额符号分桶汇总：正、负、零三桶互不重叠，覆盖全部账户
pub fn summarize_balances(rows: &[AccountLedgerRow]) -> BalanceSummary {
    let mut summary = BalanceSummary::default();
    for row in rows {
        let balance = row.current_balance;
        // 零值可能带负号，先判零
        if balance.is_zero() {
            summary.zero_count += 1;
        } else if balance.is_sign_positive() {
            summary.positive_total += balance;
            summary.positive_count += 1;
        } else {
            summary.negative_total += balance;
            summary.negative_count += 1;
        }
        summary.net_total += balance;
        summary.total_deposits += row.total_deposits;
        summary.total_withdrawals += row.total_withdrawals;
    }
    summary
}

pub async fn balance_report(
    service: &AccountService,
    query: AccountListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_account_ledger(query).await {
        Ok(accounts) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            BalanceReportResponse {
                summary: summarize_balances(&accounts),
                accounts,
            },
            "Balance report generated successfully",
        ))),
        Err(e) => Ok(error_response(
            "Failed to generate balance report",
            e,
            ErrorCode::AccountNotFound,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn row(account_id: i64, balance: i64, deposits: i64, withdrawals: i64) -> AccountLedgerRow {
        AccountLedgerRow {
            account_id,
            student_id: account_id,
            student_name: format!("Student {account_id}"),
            admission_number: format!("ADM{account_id}"),
            account_type: "Tuition".to_string(),
            current_balance: Decimal::new(balance, 0),
            total_deposits: Decimal::new(deposits, 0),
            total_withdrawals: Decimal::new(withdrawals, 0),
        }
    }

    #[test]
    fn test_summarize_balances_buckets() {
        let rows = vec![
            row(1, 150, 200, 50),
            row(2, -30, 0, 30),
            row(3, 0, 10, 10),
            row(4, 50, 50, 0),
        ];
        let summary = summarize_balances(&rows);
        assert_eq!(summary.positive_count, 2);
        assert_eq!(summary.positive_total, Decimal::new(200, 0));
        assert_eq!(summary.negative_count, 1);
        assert_eq!(summary.negative_total, Decimal::new(-30, 0));
        assert_eq!(summary.zero_count, 1);
        assert_eq!(summary.net_total, Decimal::new(170, 0));
        assert_eq!(summary.total_deposits, Decimal::new(260, 0));
        assert_eq!(summary.total_withdrawals, Decimal::new(90, 0));
        assert_eq!(
            summary.positive_count + summary.negative_count + summary.zero_count,
            rows.len() as i64
        );
    }

    #[test]
    fn test_summarize_balances_fractional_zero() {
        // 0.1 + 0.2 - 0.3 精确归零
        let mut ledger = row(1, 0, 0, 0);
        ledger.current_balance =
            Decimal::new(1, 1) + Decimal::new(2, 1) - Decimal::new(3, 1);
        let mut negative_zero = row(2, 0, 0, 0);
        negative_zero.current_balance.set_sign_negative(true);

        let summary = summarize_balances(&[ledger, negative_zero]);
        assert_eq!(summary.zero_count, 2);
        assert_eq!(summary.positive_count, 0);
        assert_eq!(summary.negative_count, 0);
        assert!(summary.net_total.is_zero());
    }

    #[test]
    fn test_summarize_balances_empty() {
        assert_eq!(summarize_balances(&[]), BalanceSummary::default());
    }
}
