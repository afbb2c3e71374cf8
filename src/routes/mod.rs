pub mod auth;

pub mod users;

pub mod teachers;

pub mod classes;

pub mod students;

pub mod subjects;

pub mod marks;

pub mod grades;

pub mod attendance;

pub mod accounts;

pub mod payments;

pub mod invoices;

pub mod activities;

pub mod system;

pub mod frontend;

pub use accounts::configure_account_routes;
pub use activities::configure_activity_routes;
pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use frontend::configure_frontend_routes;
pub use grades::configure_grade_routes;
pub use invoices::configure_invoice_routes;
pub use marks::configure_mark_routes;
pub use payments::configure_payment_routes;
pub use students::configure_student_routes;
pub use subjects::configure_subject_routes;
pub use system::configure_system_routes;
pub use teachers::configure_teacher_routes;
pub use users::configure_user_routes;

use actix_web::web;

/// 注册全部 API 路由，前端 fallback 必须最后注册
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_teacher_routes)
        .configure(configure_classes_routes)
        .configure(configure_student_routes)
        .configure(configure_subject_routes)
        .configure(configure_mark_routes)
        .configure(configure_grade_routes)
        .configure(configure_attendance_routes)
        .configure(configure_account_routes)
        .configure(configure_payment_routes)
        .configure(configure_invoice_routes)
        .configure(configure_activity_routes)
        .configure(configure_system_routes);
}
