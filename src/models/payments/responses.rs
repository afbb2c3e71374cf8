use rust_decimal::Decimal;
use super::entities::{Payment, PaymentMethod};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 按支付方式的小计
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct MethodSubtotal {
    pub method: PaymentMethod,
    pub count: i64,
    #[ts(type = "string")]
    pub total: Decimal,
}

// 整个筛选结果集上的合计
#[derive(Debug, Clone, Default, Serialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct PaymentTotals {
    pub count: i64,
    #[ts(type = "string")]
    pub total_amount: Decimal,
    pub by_method: Vec<MethodSubtotal>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct PaymentListResponse {
    pub items: Vec<Payment>,
    pub pagination: PaginationInfo,
    pub totals: PaymentTotals,
}

impl PaymentTotals {
    /// 汇总金额、笔数与按支付方式的小计；小计按固定的方式顺序输出
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (PaymentMethod, Decimal)>,
    {
        let order = [
            PaymentMethod::Cash,
            PaymentMethod::Bank,
            PaymentMethod::MobileMoney,
            PaymentMethod::Cheque,
        ];
        let mut by_method: Vec<MethodSubtotal> = order
            .iter()
            .map(|&method| MethodSubtotal {
                method,
                count: 0,
                total: Decimal::ZERO,
            })
            .collect();

        let mut totals = PaymentTotals::default();
        for (method, amount) in rows {
            totals.count += 1;
            totals.total_amount += amount;
            if let Some(sub) = by_method.iter_mut().find(|s| s.method == method) {
                sub.count += 1;
                sub.total += amount;
            }
        }
        totals.by_method = by_method.into_iter().filter(|s| s.count > 0).collect();
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_empty() {
        let totals = PaymentTotals::from_rows(Vec::new());
        assert_eq!(totals.count, 0);
        assert!(totals.total_amount.is_zero());
        assert!(totals.by_method.is_empty());
    }

    #[test]
    fn test_totals_grouped_by_method() {
        let totals = PaymentTotals::from_rows(vec![
            (PaymentMethod::Cash, Decimal::new(100, 0)),
            (PaymentMethod::MobileMoney, Decimal::new(50, 0)),
            (PaymentMethod::Cash, Decimal::new(255, 1)),
        ]);
        assert_eq!(totals.count, 3);
        assert_eq!(totals.total_amount, Decimal::new(1755, 1));
        assert_eq!(
            totals.by_method,
            vec![
                MethodSubtotal {
                    method: PaymentMethod::Cash,
                    count: 2,
                    total: Decimal::new(1255, 1),
                },
                MethodSubtotal {
                    method: PaymentMethod::MobileMoney,
                    count: 1,
                    total: Decimal::new(50, 0),
                },
            ]
        );
    }
}
