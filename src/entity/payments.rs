//! 缴费记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub account_id: Option<i64>,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
    pub method: String,
    pub purpose: String,
    #[sea_orm(unique)]
    pub receipt_number: String,
    pub term: Option<String>,
    pub academic_year: Option<String>,
    pub paid_on: String,
    pub recorded_by: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_payment(self) -> crate::models::payments::entities::Payment {
        use crate::models::payments::entities::{Payment, PaymentMethod};

        Payment {
            id: self.id,
            student_id: self.student_id,
            account_id: self.account_id,
            amount: self.amount,
            method: self
                .method
                .parse::<PaymentMethod>()
                .unwrap_or(PaymentMethod::Cash),
            purpose: self.purpose,
            receipt_number: self.receipt_number,
            term: self.term,
            academic_year: self.academic_year,
            paid_on: self.paid_on,
            recorded_by: self.recorded_by,
            created_at: super::timestamp_to_datetime(self.created_at),
        }
    }
}
