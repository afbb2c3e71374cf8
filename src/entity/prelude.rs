//! 预导入模块，方便使用

pub use super::account_transactions::{
    ActiveModel as AccountTransactionActiveModel, Entity as AccountTransactions,
    Model as AccountTransactionModel,
};
pub use super::accounts::{
    ActiveModel as AccountActiveModel, Entity as Accounts, Model as AccountModel,
};
pub use super::activity_logs::{
    ActiveModel as ActivityLogActiveModel, Entity as ActivityLogs, Model as ActivityLogModel,
};
pub use super::attendance::{
    ActiveModel as AttendanceActiveModel, Entity as Attendance, Model as AttendanceModel,
};
pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::grade_weights::{
    ActiveModel as GradeWeightActiveModel, Entity as GradeWeights, Model as GradeWeightModel,
};
pub use super::invoices::{
    ActiveModel as InvoiceActiveModel, Entity as Invoices, Model as InvoiceModel,
};
pub use super::mark_records::{
    ActiveModel as MarkRecordActiveModel, Entity as MarkRecords, Model as MarkRecordModel,
};
pub use super::payments::{
    ActiveModel as PaymentActiveModel, Entity as Payments, Model as PaymentModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::teachers::{
    ActiveModel as TeacherActiveModel, Entity as Teachers, Model as TeacherModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
