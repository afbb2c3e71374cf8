use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 发票状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/invoice.ts")]
pub enum InvoiceStatus {
    Unpaid,
    Paid,
    Overdue,
    Cancelled,
}

crate::models::string_enum!(InvoiceStatus {
    Unpaid => "unpaid",
    Paid => "paid",
    Overdue => "overdue",
    Cancelled => "cancelled",
});

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/invoice.ts")]
pub struct InvoiceItem {
    pub description: String,
    #[ts(type = "string")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/invoice.ts")]
pub struct Invoice {
    pub id: i64,
    // INV-<year>-<NNNN>
    pub invoice_number: String,
    pub student_id: i64,
    pub term: String,
    pub academic_year: String,
    pub items: Vec<InvoiceItem>,
    #[ts(type = "string")]
    pub total_amount: Decimal,
    pub due_date: Option<String>,
    pub status: InvoiceStatus,
    pub notes: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Invoice {
    pub const NUMBER_PREFIX: &'static str = "INV";

    /// 某年份的发票号前缀，如 `INV-2024-`
    pub fn number_prefix(year: i32) -> String {
        format!("{}-{year}-", Self::NUMBER_PREFIX)
    }

    /// 按序号格式化发票号，序号至少四位
    pub fn format_number(year: i32, sequence: u32) -> String {
        format!("{}{sequence:04}", Self::number_prefix(year))
    }

    /// 解析发票号的序号部分，格式不符时返回 None
    pub fn parse_sequence(number: &str, year: i32) -> Option<u32> {
        number
            .strip_prefix(&Self::number_prefix(year))
            .and_then(|suffix| suffix.parse().ok())
    }

    /// 根据同年已存在的发票号计算下一个发票号
    pub fn next_number<'a, I>(year: i32, existing: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let max = existing
            .into_iter()
            .filter_map(|n| Self::parse_sequence(n, year))
            .max()
            .unwrap_or(0);
        Self::format_number(year, max + 1)
    }

    pub fn items_total(items: &[InvoiceItem]) -> Decimal {
        items.iter().map(|i| i.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_invoice_number() {
        assert_eq!(Invoice::next_number(2024, []), "INV-2024-0001");
    }

    #[test]
    fn test_next_invoice_number_uses_highest_suffix() {
        let existing = ["INV-2024-0003", "INV-2024-0010", "INV-2024-0007"];
        assert_eq!(
            Invoice::next_number(2024, existing.iter().copied()),
            "INV-2024-0011"
        );
    }

    #[test]
    fn test_other_years_and_garbage_ignored() {
        let existing = ["INV-2023-0042", "INV-2024-abcd", "RCP-2024-0099"];
        assert_eq!(
            Invoice::next_number(2024, existing.iter().copied()),
            "INV-2024-0001"
        );
    }

    #[test]
    fn test_sequence_beyond_four_digits() {
        assert_eq!(Invoice::format_number(2024, 12345), "INV-2024-12345");
        assert_eq!(Invoice::parse_sequence("INV-2024-12345", 2024), Some(12345));
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            InvoiceStatus::Unpaid,
            InvoiceStatus::Paid,
            InvoiceStatus::Overdue,
            InvoiceStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<InvoiceStatus>(), Ok(status));
        }
        assert!("void".parse::<InvoiceStatus>().is_err());
    }
}
