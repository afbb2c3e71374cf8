//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod accounts;
mod activities;
mod attendance;
mod classes;
mod grades;
mod invoices;
mod marks;
mod payments;
mod students;
mod subjects;
mod teachers;
mod users;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{Result, SchoolAdminError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect(&AppConfig::get().database).await
    }

    /// 按给定数据库配置连接并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");
        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolAdminError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");
        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("mmap_size", "536870912")
                .pragma("wal_autocheckpoint", "1000");
        }

        // 内存库只存在于单个连接中
        let (max_connections, idle_timeout) = if in_memory {
            (1, None)
        } else {
            (config.pool_size, Some(Duration::from_secs(300)))
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(idle_timeout)
            .max_lifetime(if in_memory {
                None
            } else {
                Some(Duration::from_secs(1800))
            })
            .connect_with(opt)
            .await
            .map_err(|e| SchoolAdminError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt).await.map_err(|e| {
            SchoolAdminError::database_connection(format!("无法连接到数据库: {e}"))
        })
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolAdminError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    accounts::{
        entities::{Account, AccountLedgerRow, AccountStatus, AccountTransaction},
        requests::{AccountListQuery, CreateAccountRequest, RecordTransactionRequest},
    },
    activities::{
        requests::{ActivityListQuery, NewActivity},
        responses::ActivityListResponse,
    },
    attendance::{
        entities::{AttendanceMark, AttendanceRecord, AttendanceSheet},
        requests::AttendanceListQuery,
    },
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
    grades::entities::WeightConfig,
    invoices::{
        entities::{Invoice, InvoiceStatus},
        requests::{InvoiceListQuery, NewInvoice},
        responses::InvoiceListResponse,
    },
    marks::{
        entities::MarkRecord,
        requests::{MarkListQuery, UpsertMarksRequest},
    },
    payments::{
        entities::Payment,
        requests::{NewPayment, PaymentListQuery},
        responses::PaymentListResponse,
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    subjects::{entities::Subject, requests::CreateSubjectRequest},
    teachers::{
        entities::TeacherProfile,
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
        responses::TeacherListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 教师模块
    async fn create_teacher(&self, req: CreateTeacherRequest) -> Result<TeacherProfile> {
        self.create_teacher_impl(req).await
    }

    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<TeacherProfile>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<TeacherProfile>> {
        self.get_teacher_by_user_id_impl(user_id).await
    }

    async fn find_any_active_teacher(&self) -> Result<Option<TeacherProfile>> {
        self.find_any_active_teacher_impl().await
    }

    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse> {
        self.list_teachers_with_pagination_impl(query).await
    }

    async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<TeacherProfile>> {
        self.update_teacher_impl(id, update).await
    }

    async fn delete_teacher(&self, id: i64) -> Result<bool> {
        self.delete_teacher_impl(id).await
    }

    // 班级模块
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        self.list_classes_with_pagination_impl(query).await
    }

    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        self.update_class_impl(class_id, update).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }

    // 学生模块
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(req).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn list_students_by_class(&self, class_id: i64) -> Result<Vec<Student>> {
        self.list_students_by_class_impl(class_id).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    // 科目模块
    async fn create_subject(&self, req: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(req).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.list_subjects_impl().await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    // 成绩模块
    async fn upsert_marks(&self, req: UpsertMarksRequest, recorded_by: i64) -> Result<i64> {
        self.upsert_marks_impl(req, recorded_by).await
    }

    async fn list_marks(&self, query: MarkListQuery) -> Result<Vec<MarkRecord>> {
        self.list_marks_impl(query).await
    }

    async fn delete_mark(&self, id: i64) -> Result<bool> {
        self.delete_mark_impl(id).await
    }

    async fn get_grade_weights(&self) -> Result<Option<WeightConfig>> {
        self.get_grade_weights_impl().await
    }

    async fn save_grade_weights(
        &self,
        weights: WeightConfig,
        updated_by: i64,
    ) -> Result<WeightConfig> {
        self.save_grade_weights_impl(weights, updated_by).await
    }

    // 考勤模块
    async fn upsert_attendance(
        &self,
        sheet: AttendanceSheet,
        marks: Vec<AttendanceMark>,
    ) -> Result<i64> {
        self.upsert_attendance_impl(sheet, marks).await
    }

    async fn list_attendance(&self, query: AttendanceListQuery) -> Result<Vec<AttendanceRecord>> {
        self.list_attendance_impl(query).await
    }

    // 账户模块
    async fn create_account(&self, req: CreateAccountRequest) -> Result<Account> {
        self.create_account_impl(req).await
    }

    async fn get_account_by_id(&self, id: i64) -> Result<Option<Account>> {
        self.get_account_by_id_impl(id).await
    }

    async fn list_accounts(&self, query: AccountListQuery) -> Result<Vec<Account>> {
        self.list_accounts_impl(query).await
    }

    async fn update_account_status(
        &self,
        id: i64,
        status: AccountStatus,
    ) -> Result<Option<Account>> {
        self.update_account_status_impl(id, status).await
    }

    async fn record_transaction(
        &self,
        account_id: i64,
        req: RecordTransactionRequest,
        recorded_by: i64,
    ) -> Result<(Account, AccountTransaction)> {
        self.record_transaction_impl(account_id, req, recorded_by)
            .await
    }

    async fn list_account_transactions(
        &self,
        account_id: i64,
    ) -> Result<Vec<AccountTransaction>> {
        self.list_account_transactions_impl(account_id).await
    }

    async fn list_account_ledger(&self, query: AccountListQuery) -> Result<Vec<AccountLedgerRow>> {
        self.list_account_ledger_impl(query).await
    }

    // 缴费模块
    async fn create_payment(&self, payment: NewPayment) -> Result<Payment> {
        self.create_payment_impl(payment).await
    }

    async fn get_payment_by_id(&self, id: i64) -> Result<Option<Payment>> {
        self.get_payment_by_id_impl(id).await
    }

    async fn list_payments_with_pagination(
        &self,
        query: PaymentListQuery,
    ) -> Result<PaymentListResponse> {
        self.list_payments_with_pagination_impl(query).await
    }

    async fn list_payments_for_export(
        &self,
        query: PaymentListQuery,
        limit: u64,
    ) -> Result<Vec<Payment>> {
        self.list_payments_for_export_impl(query, limit).await
    }

    // 发票模块
    async fn create_invoice(&self, invoice: NewInvoice) -> Result<Invoice> {
        self.create_invoice_impl(invoice).await
    }

    async fn get_invoice_by_id(&self, id: i64) -> Result<Option<Invoice>> {
        self.get_invoice_by_id_impl(id).await
    }

    async fn list_invoices_with_pagination(
        &self,
        query: InvoiceListQuery,
    ) -> Result<InvoiceListResponse> {
        self.list_invoices_with_pagination_impl(query).await
    }

    async fn update_invoice_status(
        &self,
        id: i64,
        status: InvoiceStatus,
    ) -> Result<Option<Invoice>> {
        self.update_invoice_status_impl(id, status).await
    }

    async fn delete_invoice(&self, id: i64) -> Result<bool> {
        self.delete_invoice_impl(id).await
    }

    // 操作日志模块
    async fn create_activity(&self, activity: NewActivity) -> Result<()> {
        self.create_activity_impl(activity).await
    }

    async fn list_activities_with_pagination(
        &self,
        query: ActivityListQuery,
    ) -> Result<ActivityListResponse> {
        self.list_activities_with_pagination_impl(query).await
    }
}

/// 分页结果的统一构造
pub(crate) fn pagination_info(
    page: u64,
    size: u64,
    total: u64,
    pages: u64,
) -> crate::models::PaginationInfo {
    crate::models::PaginationInfo {
        page: page as i64,
        page_size: size as i64,
        total: total as i64,
        total_pages: pages as i64,
    }
}
