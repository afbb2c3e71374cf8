//! 数据模型定义
//!
//! 每个业务模块分为 `entities`（业务实体）、`requests`（请求参数）和
//! `responses`（响应结构）。

pub mod accounts;
pub mod activities;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod common;
pub mod grades;
pub mod invoices;
pub mod marks;
pub mod payments;
pub mod students;
pub mod subjects;
pub mod system;
pub mod teachers;
pub mod users;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误代码
///
/// - `0`: 成功
/// - `1xxx`: 通用错误
/// - `2xxx`: 认证与用户
/// - `3xxx`: 学籍（学生、班级、科目、教师）
/// - `4xxx`: 成绩与考勤
/// - `5xxx`: 财务（账户、缴费、发票）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    AuthFailed = 2000,
    SessionExpired = 2001,
    UserNotFound = 2004,
    UserNameInvalid = 2010,
    UserEmailInvalid = 2011,
    UserPasswordInvalid = 2012,
    UserAlreadyExists = 2013,
    CanNotDeleteCurrentUser = 2020,

    StudentNotFound = 3004,
    ClassNotFound = 3104,
    SubjectNotFound = 3204,
    TeacherNotFound = 3304,
    TeacherUnavailable = 3305,

    InvalidWeights = 4000,
    TranscriptEmpty = 4001,
    AttendanceFailed = 4100,
    MarksInvalid = 4200,
    ExportFailed = 4300,

    AccountNotFound = 5004,
    TransactionInvalid = 5010,
    PaymentNotFound = 5104,
    InvoiceNotFound = 5204,
    InvoiceNumberExhausted = 5205,
}

/// 为字符串存储的枚举生成 `as_str`、`Display` 与 `FromStr`
///
/// 数据库中这些枚举以小写 snake_case 文本保存，
/// 文本必须与 serde 的 `rename_all = "snake_case"` 保持一致。
macro_rules! string_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(format!("Invalid {}: {s}", stringify!($name))),
                }
            }
        }
    };
}

pub(crate) use string_enum;
