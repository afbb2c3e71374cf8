//! 发票实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub invoice_number: String,
    pub student_id: i64,
    pub term: String,
    pub academic_year: String,
    // 明细项，JSON 数组
    #[sea_orm(column_type = "Text")]
    pub items: String,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub total_amount: Decimal,
    pub due_date: Option<String>,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_invoice(self) -> crate::models::invoices::entities::Invoice {
        use crate::models::invoices::entities::{Invoice, InvoiceStatus};

        Invoice {
            id: self.id,
            invoice_number: self.invoice_number,
            student_id: self.student_id,
            term: self.term,
            academic_year: self.academic_year,
            items: serde_json::from_str(&self.items).unwrap_or_else(|e| {
                tracing::warn!("Invoice {} has malformed items: {}", self.id, e);
                Vec::new()
            }),
            total_amount: self.total_amount,
            due_date: self.due_date,
            status: self
                .status
                .parse::<InvoiceStatus>()
                .unwrap_or(InvoiceStatus::Unpaid),
            notes: self.notes,
            created_by: self.created_by,
            created_at: super::timestamp_to_datetime(self.created_at),
            updated_at: super::timestamp_to_datetime(self.updated_at),
        }
    }
}
