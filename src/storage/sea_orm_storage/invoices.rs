//! 发票存储操作

use super::{SeaOrmStorage, pagination_info};
use crate::entity::invoices::{ActiveModel, Column, Entity as Invoices};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{Result, SchoolAdminError};
use crate::models::{
    common::normalize_page,
    invoices::{
        entities::{Invoice, InvoiceStatus},
        requests::{InvoiceListQuery, NewInvoice},
        responses::InvoiceListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

/// 发票号冲突时的最大尝试次数
const MAX_NUMBER_ATTEMPTS: usize = 5;

impl SeaOrmStorage {
    /// 创建发票
    ///
    /// 在事务内取同年最大序号加一作为发票号；并发请求拿到同一号码时，
    /// 唯一约束使后到者失败并重新分配。
    pub async fn create_invoice_impl(&self, invoice: NewInvoice) -> Result<Invoice> {
        let items_json = serde_json::to_string(&invoice.items)?;
        let prefix = Invoice::number_prefix(invoice.year);

        for attempt in 1..=MAX_NUMBER_ATTEMPTS {
            let txn = self.db.begin().await.map_err(|e| {
                SchoolAdminError::database_operation(format!("开启事务失败: {e}"))
            })?;

            let existing: Vec<String> = Invoices::find()
                .select_only()
                .column(Column::InvoiceNumber)
                .filter(Column::InvoiceNumber.starts_with(&prefix))
                .into_tuple()
                .all(&txn)
                .await
                .map_err(|e| {
                    SchoolAdminError::database_operation(format!("查询发票号失败: {e}"))
                })?;
            let number = Invoice::next_number(invoice.year, existing.iter().map(String::as_str));

            let now = chrono::Utc::now().timestamp();
            let inserted = ActiveModel {
                invoice_number: Set(number.clone()),
                student_id: Set(invoice.student_id),
                term: Set(invoice.term.clone()),
                academic_year: Set(invoice.academic_year.clone()),
                items: Set(items_json.clone()),
                total_amount: Set(invoice.total_amount),
                due_date: Set(invoice.due_date.clone()),
                status: Set(InvoiceStatus::Unpaid.to_string()),
                notes: Set(invoice.notes.clone()),
                created_by: Set(invoice.created_by),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| SchoolAdminError::from_db("创建发票失败", e));

            match inserted {
                Ok(model) => {
                    txn.commit().await.map_err(|e| {
                        SchoolAdminError::from_db("提交发票事务失败", e)
                    })?;
                    return Ok(model.into_invoice());
                }
                Err(e) if e.is_conflict() => {
                    tracing::warn!(
                        "Invoice number {} already taken (attempt {}/{}), retrying",
                        number,
                        attempt,
                        MAX_NUMBER_ATTEMPTS
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(SchoolAdminError::conflict(format!(
            "Could not allocate an invoice number after {MAX_NUMBER_ATTEMPTS} attempts"
        )))
    }

    pub async fn get_invoice_by_id_impl(&self, id: i64) -> Result<Option<Invoice>> {
        let result = Invoices::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询发票失败: {e}")))?;

        Ok(result.map(|m| m.into_invoice()))
    }

    pub async fn list_invoices_with_pagination_impl(
        &self,
        query: InvoiceListQuery,
    ) -> Result<InvoiceListResponse> {
        let (page, size) = normalize_page(query.page, query.size, 20);

        let mut select = Invoices::find();

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }
        if let Some(ref term) = query.term {
            select = select.filter(Column::Term.eq(term.as_str()));
        }
        if let Some(ref year) = query.academic_year {
            select = select.filter(Column::AcademicYear.eq(year.as_str()));
        }
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

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询发票总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询发票页数失败: {e}"))
        })?;
        let invoices = paginator.fetch_page(page - 1).await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询发票列表失败: {e}"))
        })?;

        Ok(InvoiceListResponse {
            items: invoices.into_iter().map(|m| m.into_invoice()).collect(),
            pagination: pagination_info(page, size, total, pages),
        })
    }

    pub async fn update_invoice_status_impl(
        &self,
        id: i64,
        status: InvoiceStatus,
    ) -> Result<Option<Invoice>> {
        let result = Invoices::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(status.to_string()),
            )
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("更新发票状态失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_invoice_by_id_impl(id).await
    }

    pub async fn delete_invoice_impl(&self, id: i64) -> Result<bool> {
        let result = Invoices::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("删除发票失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
