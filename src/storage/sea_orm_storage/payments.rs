//! 缴费记录存储操作

use super::accounts::{TransactionDraft, apply_account_transaction};
use super::{SeaOrmStorage, pagination_info};
use crate::entity::accounts::Entity as Accounts;
use crate::entity::payments::{ActiveModel, Column, Entity as Payments};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{Result, SchoolAdminError};
use crate::models::{
    accounts::entities::TransactionKind,
    common::normalize_page,
    payments::{
        entities::{Payment, PaymentMethod},
        requests::{NewPayment, PaymentListQuery},
        responses::{PaymentListResponse, PaymentTotals},
    },
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set, TransactionTrait,
};

/// 无法识别的支付方式记一条警告后跳过，不计入任何分项
fn known_method_amounts(
    rows: Vec<(String, Decimal)>,
) -> impl Iterator<Item = (PaymentMethod, Decimal)> {
    rows.into_iter()
        .filter_map(|(method, amount)| match method.parse::<PaymentMethod>() {
            Ok(method) => Some((method, amount)),
            Err(e) => {
                tracing::warn!("Skipping payment with unknown method in totals: {}", e);
                None
            }
        })
}

impl SeaOrmStorage {
    /// 登记缴费；指定账户时同一事务内写入一笔同收据号的存入流水
    pub async fn create_payment_impl(&self, payment: NewPayment) -> Result<Payment> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("开启事务失败: {e}")))?;

        if let Some(account_id) = payment.account_id {
            let account = Accounts::find_by_id(account_id)
                .one(&txn)
                .await
                .map_err(|e| SchoolAdminError::database_operation(format!("查询账户失败: {e}")))?
                .ok_or_else(|| {
                    SchoolAdminError::not_found(format!("Account {account_id} not found"))
                })?;
            if account.student_id != payment.student_id {
                return Err(SchoolAdminError::validation(
                    "Account does not belong to this student",
                ));
            }

            apply_account_transaction(
                &txn,
                account_id,
                TransactionDraft {
                    kind: TransactionKind::Deposit,
                    amount: payment.amount,
                    receipt_number: Some(payment.receipt_number.clone()),
                    description: Some(format!("Payment: {}", payment.purpose)),
                    recorded_by: payment.recorded_by,
                },
            )
            .await?;
        }

        let model = ActiveModel {
            student_id: Set(payment.student_id),
            account_id: Set(payment.account_id),
            amount: Set(payment.amount),
            method: Set(payment.method.to_string()),
            purpose: Set(payment.purpose),
            receipt_number: Set(payment.receipt_number),
            term: Set(payment.term),
            academic_year: Set(payment.academic_year),
            paid_on: Set(payment.paid_on),
            recorded_by: Set(payment.recorded_by),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| SchoolAdminError::from_db("登记缴费失败", e))?;

        txn.commit()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(model.into_payment())
    }

    pub async fn get_payment_by_id_impl(&self, id: i64) -> Result<Option<Payment>> {
        let result = Payments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询缴费记录失败: {e}")))?;

        Ok(result.map(|m| m.into_payment()))
    }

    /// 按筛选条件构造缴费查询；班级先解析为学生 ID 集合
    async fn filtered_payments(&self, query: &PaymentListQuery) -> Result<Select<Payments>> {
        let mut select = Payments::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(class_id) = query.class_id {
            let student_ids: Vec<i64> = Students::find()
                .select_only()
                .column(StudentColumn::Id)
                .filter(StudentColumn::ClassId.eq(class_id))
                .into_tuple()
                .all(&self.db)
                .await
                .map_err(|e| {
                    SchoolAdminError::database_operation(format!("查询班级学生失败: {e}"))
                })?;
            select = select.filter(Column::StudentId.is_in(student_ids));
        }
        if let Some(method) = query.method {
            select = select.filter(Column::Method.eq(method.as_str()));
        }
        if let Some(ref term) = query.term {
            select = select.filter(Column::Term.eq(term.as_str()));
        }
        if let Some(ref year) = query.academic_year {
            select = select.filter(Column::AcademicYear.eq(year.as_str()));
        }
        if let Some(ref from) = query.date_from {
            select = select.filter(Column::PaidOn.gte(from.as_str()));
        }
        if let Some(ref to) = query.date_to {
            select = select.filter(Column::PaidOn.lte(to.as_str()));
        }

        Ok(select)
    }

    /// 分页列出缴费记录，合计覆盖整个筛选结果而非当前页
    pub async fn list_payments_with_pagination_impl(
        &self,
        query: PaymentListQuery,
    ) -> Result<PaymentListResponse> {
        let (page, size) = normalize_page(query.page, query.size, 20);
        let select = self.filtered_payments(&query).await?;

        let amounts: Vec<(String, Decimal)> = select
            .clone()
            .select_only()
            .column(Column::Method)
            .column(Column::Amount)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("统计缴费金额失败: {e}")))?;

        let totals = PaymentTotals::from_rows(known_method_amounts(amounts));

        let paginator = select
            .order_by_desc(Column::PaidOn)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询缴费总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询缴费页数失败: {e}"))
        })?;
        let payments = paginator.fetch_page(page - 1).await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询缴费列表失败: {e}"))
        })?;

        Ok(PaymentListResponse {
            items: payments.into_iter().map(|m| m.into_payment()).collect(),
            pagination: pagination_info(page, size, total, pages),
            totals,
        })
    }

    /// 导出用的缴费列表，按缴费日期排序，最多 limit 条
    pub async fn list_payments_for_export_impl(
        &self,
        query: PaymentListQuery,
        limit: u64,
    ) -> Result<Vec<Payment>> {
        let payments = self
            .filtered_payments(&query)
            .await?
            .order_by_desc(Column::PaidOn)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("导出缴费记录失败: {e}")))?;

        Ok(payments.into_iter().map(|m| m.into_payment()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_methods_are_left_out_of_totals() {
        let rows = vec![
            ("cash".to_string(), Decimal::new(100, 0)),
            ("barter".to_string(), Decimal::new(40, 0)),
            ("bank".to_string(), Decimal::new(25, 0)),
        ];
        let totals = PaymentTotals::from_rows(known_method_amounts(rows));
        assert_eq!(totals.count, 2);
        assert_eq!(totals.total_amount, Decimal::new(125, 0));
    }
}
