//! 学生账户与流水存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::account_transactions::{
    ActiveModel as TransactionActiveModel, Column as TransactionColumn,
    Entity as AccountTransactions, Model as TransactionModel,
};
use crate::entity::accounts::{ActiveModel, Column, Entity as Accounts, Model as AccountModel};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{Result, SchoolAdminError};
use crate::models::accounts::{
    entities::{
        Account, AccountLedgerRow, AccountStatus, AccountTransaction, TransactionKind,
    },
    requests::{AccountListQuery, CreateAccountRequest, RecordTransactionRequest},
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};

/// 一笔待写入的账户流水
pub(super) struct TransactionDraft {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub receipt_number: Option<String>,
    pub description: Option<String>,
    pub recorded_by: Option<i64>,
}

/// 在给定连接（通常是事务）中写入流水并更新账户余额
///
/// 先锁定账户行再读余额，写入的 `balance_after` 与账户新余额一致。
/// 已关闭的账户拒绝任何流水。
pub(super) async fn apply_account_transaction<C: ConnectionTrait>(
    conn: &C,
    account_id: i64,
    draft: TransactionDraft,
) -> Result<(AccountModel, TransactionModel)> {
    let account = Accounts::find_by_id(account_id)
        .lock_exclusive()
        .one(conn)
        .await
        .map_err(|e| SchoolAdminError::database_operation(format!("查询账户失败: {e}")))?
        .ok_or_else(|| SchoolAdminError::not_found(format!("Account {account_id} not found")))?;

    if account.status == AccountStatus::Closed.as_str() {
        return Err(SchoolAdminError::validation(format!(
            "Account {account_id} is closed"
        )));
    }

    let now = chrono::Utc::now().timestamp();
    let new_balance = account.current_balance + draft.kind.signed(draft.amount);

    let mut active: ActiveModel = account.into();
    active.current_balance = Set(new_balance);
    active.updated_at = Set(now);
    let account = active
        .update(conn)
        .await
        .map_err(|e| SchoolAdminError::database_operation(format!("更新账户余额失败: {e}")))?;

    let transaction = TransactionActiveModel {
        account_id: Set(account_id),
        kind: Set(draft.kind.to_string()),
        amount: Set(draft.amount),
        balance_after: Set(new_balance),
        receipt_number: Set(draft.receipt_number),
        description: Set(draft.description),
        recorded_by: Set(draft.recorded_by),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(|e| SchoolAdminError::from_db("写入账户流水失败", e))?;

    Ok((account, transaction))
}

impl SeaOrmStorage {
    pub async fn create_account_impl(&self, req: CreateAccountRequest) -> Result<Account> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            account_type: Set(req.account_type),
            current_balance: Set(Decimal::ZERO),
            status: Set(AccountStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolAdminError::from_db("创建账户失败", e))?;

        Ok(result.into_account())
    }

    pub async fn get_account_by_id_impl(&self, id: i64) -> Result<Option<Account>> {
        let result = Accounts::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询账户失败: {e}")))?;

        Ok(result.map(|m| m.into_account()))
    }

    /// 按筛选条件构造账户查询
    ///
    /// 班级与姓名/学号搜索先解析为学生 ID 集合。
    async fn filtered_accounts(&self, query: &AccountListQuery) -> Result<Select<Accounts>> {
        let mut select = Accounts::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(ref account_type) = query.account_type
            && !account_type.trim().is_empty()
        {
            select = select.filter(Column::AccountType.eq(account_type.trim()));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }

        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        if query.class_id.is_some() || search.is_some() {
            let mut students = Students::find().select_only().column(StudentColumn::Id);
            if let Some(class_id) = query.class_id {
                students = students.filter(StudentColumn::ClassId.eq(class_id));
            }
            if let Some(search) = search {
                students = students.filter(
                    Condition::any()
                        .add(StudentColumn::FirstName.contains(search))
                        .add(StudentColumn::LastName.contains(search))
                        .add(StudentColumn::AdmissionNumber.contains(search)),
                );
            }
            let ids: Vec<i64> = students
                .into_tuple::<i64>()
                .all(&self.db)
                .await
                .map_err(|e| {
                    SchoolAdminError::database_operation(format!("查询学生失败: {e}"))
                })?;
            select = select.filter(Column::StudentId.is_in(ids));
        }

        Ok(select)
    }

    pub async fn list_accounts_impl(&self, query: AccountListQuery) -> Result<Vec<Account>> {
        let accounts = self
            .filtered_accounts(&query)
            .await?
            .order_by_asc(Column::StudentId)
            .order_by_asc(Column::AccountType)
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询账户列表失败: {e}")))?;

        Ok(accounts.into_iter().map(|m| m.into_account()).collect())
    }

    /// 关闭或重新启用账户
    pub async fn update_account_status_impl(
        &self,
        id: i64,
        status: AccountStatus,
    ) -> Result<Option<Account>> {
        let result = Accounts::update_many()
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
            .map_err(|e| SchoolAdminError::database_operation(format!("更新账户状态失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_account_by_id_impl(id).await
    }

    /// 记录存取款，余额与流水在同一事务中写入
    pub async fn record_transaction_impl(
        &self,
        account_id: i64,
        req: RecordTransactionRequest,
        recorded_by: i64,
    ) -> Result<(Account, AccountTransaction)> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("开启事务失败: {e}")))?;

        let (account, transaction) = apply_account_transaction(
            &txn,
            account_id,
            TransactionDraft {
                kind: req.kind,
                amount: req.amount,
                receipt_number: req.receipt_number,
                description: req.description,
                recorded_by: Some(recorded_by),
            },
        )
        .await?;

        txn.commit()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("提交事务失败: {e}")))?;

        Ok((account.into_account(), transaction.into_transaction()))
    }

    pub async fn list_account_transactions_impl(
        &self,
        account_id: i64,
    ) -> Result<Vec<AccountTransaction>> {
        let items = AccountTransactions::find()
            .filter(TransactionColumn::AccountId.eq(account_id))
            .order_by_desc(TransactionColumn::CreatedAt)
            .order_by_desc(TransactionColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询账户流水失败: {e}")))?;

        Ok(items.into_iter().map(|m| m.into_transaction()).collect())
    }

    /// 余额报表明细：每个账户附带学生信息与存取款合计
    pub async fn list_account_ledger_impl(
        &self,
        query: AccountListQuery,
    ) -> Result<Vec<AccountLedgerRow>> {
        let accounts = self
            .filtered_accounts(&query)
            .await?
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询账户列表失败: {e}")))?;

        if accounts.is_empty() {
            return Ok(Vec::new());
        }

        let account_ids: Vec<i64> = accounts.iter().map(|a| a.id).collect();
        let student_ids: Vec<i64> = accounts.iter().map(|a| a.student_id).collect();

        let students: HashMap<i64, (String, String)> = Students::find()
            .filter(StudentColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询学生失败: {e}")))?
            .into_iter()
            .map(|s| {
                (
                    s.id,
                    (format!("{} {}", s.first_name, s.last_name), s.admission_number),
                )
            })
            .collect();

        let movements: Vec<(i64, String, Decimal)> = AccountTransactions::find()
            .select_only()
            .column(TransactionColumn::AccountId)
            .column(TransactionColumn::Kind)
            .column(TransactionColumn::Amount)
            .filter(TransactionColumn::AccountId.is_in(account_ids))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询账户流水失败: {e}")))?;

        // account_id -> (存入合计, 支取合计)
        let mut totals: HashMap<i64, (Decimal, Decimal)> = HashMap::new();
        for (account_id, kind, amount) in movements {
            let entry = totals.entry(account_id).or_default();
            match kind.parse::<TransactionKind>() {
                Ok(TransactionKind::Deposit) => entry.0 += amount,
                Ok(TransactionKind::Withdrawal) => entry.1 += amount,
                Err(e) => tracing::warn!("Skipping transaction with unknown kind: {}", e),
            }
        }

        let mut rows: Vec<AccountLedgerRow> = accounts
            .into_iter()
            .map(|a| {
                let (student_name, admission_number) =
                    students.get(&a.student_id).cloned().unwrap_or_default();
                let (total_deposits, total_withdrawals) =
                    totals.get(&a.id).copied().unwrap_or_default();
                AccountLedgerRow {
                    account_id: a.id,
                    student_id: a.student_id,
                    student_name,
                    admission_number,
                    account_type: a.account_type,
                    current_balance: a.current_balance,
                    total_deposits,
                    total_withdrawals,
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            a.student_name
                .cmp(&b.student_name)
                .then_with(|| a.account_type.cmp(&b.account_type))
        });

        Ok(rows)
    }
}
