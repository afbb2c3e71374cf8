use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 教师档案方法
    async fn create_teacher(&self, req: CreateTeacherRequest) -> Result<TeacherProfile>;
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<TeacherProfile>>;
    // 通过账号ID获取教师档案
    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<TeacherProfile>>;
    // 任取一个在职教师（按ID升序）
    async fn find_any_active_teacher(&self) -> Result<Option<TeacherProfile>>;
    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse>;
    async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<TeacherProfile>>;
    async fn delete_teacher(&self, id: i64) -> Result<bool>;

    /// 班级管理方法
    // 创建班级
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 列出班级
    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse>;
    // 更新班级信息
    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>>;
    // 删除班级（学生移出班级）
    async fn delete_class(&self, class_id: i64) -> Result<bool>;

    /// 学生管理方法
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    // 班级全部学生（按姓名排序）
    async fn list_students_by_class(&self, class_id: i64) -> Result<Vec<Student>>;
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    // 删除学生（级联删除成绩、考勤、账户、缴费、发票）
    async fn delete_student(&self, id: i64) -> Result<bool>;

    /// 科目管理方法
    async fn create_subject(&self, req: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects(&self) -> Result<Vec<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;

    /// 成绩录入方法
    // 批量写入成绩，同键覆盖，返回写入条数
    async fn upsert_marks(&self, req: UpsertMarksRequest, recorded_by: i64) -> Result<i64>;
    async fn list_marks(&self, query: MarkListQuery) -> Result<Vec<MarkRecord>>;
    async fn delete_mark(&self, id: i64) -> Result<bool>;

    /// 成绩权重方法
    async fn get_grade_weights(&self) -> Result<Option<WeightConfig>>;
    async fn save_grade_weights(
        &self,
        weights: WeightConfig,
        updated_by: i64,
    ) -> Result<WeightConfig>;

    /// 考勤方法
    // 在一个事务中写入整批考勤，任何一条失败则全部回滚
    async fn upsert_attendance(
        &self,
        sheet: AttendanceSheet,
        marks: Vec<AttendanceMark>,
    ) -> Result<i64>;
    async fn list_attendance(&self, query: AttendanceListQuery) -> Result<Vec<AttendanceRecord>>;

    /// 账户方法
    async fn create_account(&self, req: CreateAccountRequest) -> Result<Account>;
    async fn get_account_by_id(&self, id: i64) -> Result<Option<Account>>;
    async fn list_accounts(&self, query: AccountListQuery) -> Result<Vec<Account>>;
    async fn update_account_status(
        &self,
        id: i64,
        status: AccountStatus,
    ) -> Result<Option<Account>>;
    // 记录存取款并更新余额（同一事务）
    async fn record_transaction(
        &self,
        account_id: i64,
        req: RecordTransactionRequest,
        recorded_by: i64,
    ) -> Result<(Account, AccountTransaction)>;
    async fn list_account_transactions(&self, account_id: i64)
    -> Result<Vec<AccountTransaction>>;
    // 余额报表的明细行（含存取款合计）
    async fn list_account_ledger(&self, query: AccountListQuery) -> Result<Vec<AccountLedgerRow>>;

    /// 缴费方法
    async fn create_payment(&self, payment: NewPayment) -> Result<Payment>;
    async fn get_payment_by_id(&self, id: i64) -> Result<Option<Payment>>;
    async fn list_payments_with_pagination(
        &self,
        query: PaymentListQuery,
    ) -> Result<PaymentListResponse>;
    // 导出用：按筛选条件取前 limit 条，不做合计
    async fn list_payments_for_export(
        &self,
        query: PaymentListQuery,
        limit: u64,
    ) -> Result<Vec<Payment>>;

    /// 发票方法
    // 分配发票号并创建，发票号冲突时重试
    async fn create_invoice(&self, invoice: NewInvoice) -> Result<Invoice>;
    async fn get_invoice_by_id(&self, id: i64) -> Result<Option<Invoice>>;
    async fn list_invoices_with_pagination(
        &self,
        query: InvoiceListQuery,
    ) -> Result<InvoiceListResponse>;
    async fn update_invoice_status(
        &self,
        id: i64,
        status: InvoiceStatus,
    ) -> Result<Option<Invoice>>;
    async fn delete_invoice(&self, id: i64) -> Result<bool>;

    /// 操作日志方法
    async fn create_activity(&self, activity: NewActivity) -> Result<()>;
    async fn list_activities_with_pagination(
        &self,
        query: ActivityListQuery,
    ) -> Result<ActivityListResponse>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
