//! 账户流水实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "account_transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub account_id: i64,
    pub kind: String,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub balance_after: Decimal,
    pub receipt_number: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub recorded_by: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id"
    )]
    Account,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_transaction(self) -> crate::models::accounts::entities::AccountTransaction {
        use crate::models::accounts::entities::{AccountTransaction, TransactionKind};

        AccountTransaction {
            id: self.id,
            account_id: self.account_id,
            kind: self
                .kind
                .parse::<TransactionKind>()
                .unwrap_or(TransactionKind::Deposit),
            amount: self.amount,
            balance_after: self.balance_after,
            receipt_number: self.receipt_number,
            description: self.description,
            recorded_by: self.recorded_by,
            created_at: super::timestamp_to_datetime(self.created_at),
        }
    }
}
