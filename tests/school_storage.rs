//! 存储层与业务流程的集成测试（内存 SQLite）

use rust_school_admin::config::DatabaseConfig;
use rust_school_admin::errors::SchoolAdminError;
use rust_decimal::Decimal;
use rust_school_admin::models::accounts::entities::{AccountStatus, TransactionKind};
use rust_school_admin::models::accounts::requests::{
    AccountListQuery, CreateAccountRequest, RecordTransactionRequest,
};
use rust_school_admin::models::attendance::entities::{
    AttendanceMark, AttendanceSheet, AttendanceStatus,
};
use rust_school_admin::models::attendance::requests::AttendanceListQuery;
use rust_school_admin::models::classes::entities::Class;
use rust_school_admin::models::classes::requests::CreateClassRequest;
use rust_school_admin::models::grades::entities::WeightConfig;
use rust_school_admin::models::invoices::entities::{Invoice, InvoiceItem};
use rust_school_admin::models::invoices::requests::NewInvoice;
use rust_school_admin::models::marks::entities::MarkComponent;
use rust_school_admin::models::marks::requests::{MarkEntry, UpsertMarksRequest};
use rust_school_admin::models::payments::entities::PaymentMethod;
use rust_school_admin::models::payments::requests::{NewPayment, PaymentListQuery};
use rust_school_admin::models::students::entities::Student;
use rust_school_admin::models::students::requests::CreateStudentRequest;
use rust_school_admin::models::subjects::requests::CreateSubjectRequest;
use rust_school_admin::models::teachers::entities::TeacherStatus;
use rust_school_admin::models::teachers::requests::{CreateTeacherRequest, UpdateTeacherRequest};
use rust_school_admin::models::users::entities::{User, UserRole};
use rust_school_admin::models::users::requests::CreateUserRequest;
use rust_school_admin::services::accounts::ledger::summarize_balances;
use rust_school_admin::services::attendance::resolve::resolve_teacher_id;
use rust_school_admin::services::grades::report::build_transcript;
use rust_school_admin::storage::Storage;
use rust_school_admin::storage::sea_orm_storage::SeaOrmStorage;

async fn memory_storage() -> SeaOrmStorage {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    SeaOrmStorage::connect(&config)
        .await
        .expect("in-memory database should migrate")
}

async fn create_user(storage: &SeaOrmStorage, username: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@school.test"),
            password: "not-a-real-hash".to_string(),
            role,
            display_name: None,
        })
        .await
        .expect("user should be created")
}

async fn create_class(storage: &SeaOrmStorage, name: &str, teacher_id: Option<i64>) -> Class {
    storage
        .create_class(CreateClassRequest {
            name: name.to_string(),
            academic_year: "2024/2025".to_string(),
            teacher_id,
        })
        .await
        .expect("class should be created")
}

async fn create_student(
    storage: &SeaOrmStorage,
    admission_number: &str,
    class_id: Option<i64>,
) -> Student {
    storage
        .create_student(CreateStudentRequest {
            admission_number: admission_number.to_string(),
            first_name: "Ama".to_string(),
            last_name: admission_number.to_string(),
            gender: None,
            date_of_birth: None,
            class_id,
            guardian_name: None,
            guardian_phone: None,
        })
        .await
        .expect("student should be created")
}

fn deposit(units: i64) -> RecordTransactionRequest {
    RecordTransactionRequest {
        kind: TransactionKind::Deposit,
        amount: Decimal::new(units, 0),
        receipt_number: None,
        description: None,
    }
}

fn withdrawal(units: i64) -> RecordTransactionRequest {
    RecordTransactionRequest {
        kind: TransactionKind::Withdrawal,
        amount: Decimal::new(units, 0),
        receipt_number: None,
        description: None,
    }
}

fn cash_payment(student_id: i64, account_id: Option<i64>, receipt: &str, paid_on: &str) -> NewPayment {
    NewPayment {
        student_id,
        account_id,
        amount: Decimal::new(100, 0),
        method: PaymentMethod::Cash,
        purpose: "Tuition".to_string(),
        receipt_number: receipt.to_string(),
        term: Some("Term 1".to_string()),
        academic_year: Some("2024/2025".to_string()),
        paid_on: paid_on.to_string(),
        recorded_by: None,
    }
}

fn sheet(class_id: i64, teacher_id: i64) -> AttendanceSheet {
    AttendanceSheet {
        class_id,
        date: "2025-01-15".to_string(),
        academic_year: "2024/2025".to_string(),
        term: "Term 1".to_string(),
        teacher_id,
    }
}

#[tokio::test]
async fn attendance_resubmission_keeps_one_row_with_latest_status() {
    let storage = memory_storage().await;
    let teacher_user = create_user(&storage, "teacher1", UserRole::Teacher).await;
    let teacher = storage
        .create_teacher(CreateTeacherRequest {
            user_id: teacher_user.id,
            staff_number: "T-001".to_string(),
            full_name: "Kofi Mensah".to_string(),
            phone: None,
        })
        .await
        .unwrap();
    let class = create_class(&storage, "Form 1A", Some(teacher.id)).await;
    let student = create_student(&storage, "ADM-001", Some(class.id)).await;

    let first = vec![AttendanceMark {
        student_id: student.id,
        status: AttendanceStatus::Absent,
        remarks: None,
    }];
    storage
        .upsert_attendance(sheet(class.id, teacher.id), first)
        .await
        .unwrap();

    let second = vec![AttendanceMark {
        student_id: student.id,
        status: AttendanceStatus::Late,
        remarks: Some("bus delay".to_string()),
    }];
    storage
        .upsert_attendance(sheet(class.id, teacher.id), second)
        .await
        .unwrap();

    let records = storage
        .list_attendance(AttendanceListQuery {
            class_id: Some(class.id),
            date: Some("2025-01-15".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, AttendanceStatus::Late);
    assert_eq!(records[0].remarks.as_deref(), Some("bus delay"));
}

#[tokio::test]
async fn teacher_resolution_follows_fallback_chain() {
    let storage = memory_storage().await;
    let admin = create_user(&storage, "admin", UserRole::Admin).await;
    let class = create_class(&storage, "Form 2B", None).await;

    // 没有任何在职教师
    let err = resolve_teacher_id(&storage, &admin, &class)
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolAdminError::NotFound(_)));

    // 教师账号没有档案时不能代替他人
    let teacher_user = create_user(&storage, "teacher2", UserRole::Teacher).await;
    let err = resolve_teacher_id(&storage, &teacher_user, &class)
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolAdminError::Authorization(_)));

    let profile = storage
        .create_teacher(CreateTeacherRequest {
            user_id: teacher_user.id,
            staff_number: "T-002".to_string(),
            full_name: "Esi Owusu".to_string(),
            phone: None,
        })
        .await
        .unwrap();

    // 管理员回退到任一在职教师
    assert_eq!(
        resolve_teacher_id(&storage, &admin, &class).await.unwrap(),
        profile.id
    );
    assert_eq!(
        resolve_teacher_id(&storage, &teacher_user, &class)
            .await
            .unwrap(),
        profile.id
    );

    // 班主任优先
    let other_user = create_user(&storage, "teacher3", UserRole::Teacher).await;
    let homeroom = storage
        .create_teacher(CreateTeacherRequest {
            user_id: other_user.id,
            staff_number: "T-003".to_string(),
            full_name: "Yaw Boateng".to_string(),
            phone: None,
        })
        .await
        .unwrap();
    let homeroom_class = create_class(&storage, "Form 3C", Some(homeroom.id)).await;
    assert_eq!(
        resolve_teacher_id(&storage, &admin, &homeroom_class)
            .await
            .unwrap(),
        homeroom.id
    );

    // 停职的档案不能用于考勤
    storage
        .update_teacher(
            profile.id,
            UpdateTeacherRequest {
                full_name: None,
                phone: None,
                status: Some(TeacherStatus::Inactive),
            },
        )
        .await
        .unwrap();
    let err = resolve_teacher_id(&storage, &teacher_user, &class)
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolAdminError::Authorization(_)));
}

#[tokio::test]
async fn invoice_numbers_increase_within_a_year() {
    let storage = memory_storage().await;
    let student = create_student(&storage, "ADM-100", None).await;

    let items = vec![
        InvoiceItem {
            description: "Tuition".to_string(),
            amount: Decimal::new(450, 0),
        },
        InvoiceItem {
            description: "PTA dues".to_string(),
            amount: Decimal::new(50, 0),
        },
    ];
    let new_invoice = || NewInvoice {
        student_id: student.id,
        term: "Term 1".to_string(),
        academic_year: "2024/2025".to_string(),
        items: items.clone(),
        total_amount: Invoice::items_total(&items),
        due_date: None,
        notes: None,
        created_by: None,
        year: 2025,
    };

    let first = storage.create_invoice(new_invoice()).await.unwrap();
    let second = storage.create_invoice(new_invoice()).await.unwrap();

    assert_eq!(first.invoice_number, "INV-2025-0001");
    assert_eq!(second.invoice_number, "INV-2025-0002");
    assert_eq!(first.total_amount, Decimal::new(500, 0));
    assert_eq!(first.items, items);
}

#[tokio::test]
async fn transcript_skips_subjects_without_marks() {
    let storage = memory_storage().await;
    let admin = create_user(&storage, "admin", UserRole::Admin).await;
    storage
        .save_grade_weights(WeightConfig::new(20.0, 20.0, 60.0), admin.id)
        .await
        .unwrap();

    let class = create_class(&storage, "Form 1A", None).await;
    let student = create_student(&storage, "ADM-200", Some(class.id)).await;
    let maths = storage
        .create_subject(CreateSubjectRequest {
            name: "Mathematics".to_string(),
            code: "MATH".to_string(),
            credits: Some(3.0),
        })
        .await
        .unwrap();
    storage
        .create_subject(CreateSubjectRequest {
            name: "French".to_string(),
            code: "FRE".to_string(),
            credits: Some(1.0),
        })
        .await
        .unwrap();

    // 没有成绩时成绩单为空
    let empty = build_transcript(&storage, student.id, "Term 1", "2024/2025")
        .await
        .unwrap()
        .expect("student exists");
    assert!(!empty.success);
    assert!(empty.subjects.is_empty());

    for (component, total) in [
        (MarkComponent::Midterm, 70.0),
        (MarkComponent::ClassScore, 80.0),
        (MarkComponent::Exam, 90.0),
    ] {
        storage
            .upsert_marks(
                UpsertMarksRequest {
                    class_id: class.id,
                    subject_id: maths.id,
                    term: "Term 1".to_string(),
                    academic_year: "2024/2025".to_string(),
                    component,
                    entries: vec![MarkEntry {
                        student_id: student.id,
                        total_marks: total,
                    }],
                },
                admin.id,
            )
            .await
            .unwrap();
    }

    let transcript = build_transcript(&storage, student.id, "Term 1", "2024/2025")
        .await
        .unwrap()
        .expect("student exists");
    assert!(transcript.success);
    assert_eq!(transcript.subjects.len(), 1);
    assert_eq!(transcript.subjects[0].subject_id, maths.id);
    assert_eq!(transcript.total_credits, 3.0);

    // 其他学期不受影响
    let other_term = build_transcript(&storage, student.id, "Term 2", "2024/2025")
        .await
        .unwrap()
        .expect("student exists");
    assert!(other_term.subjects.is_empty());

    assert!(
        build_transcript(&storage, 9999, "Term 1", "2024/2025")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn balance_report_buckets_accounts_by_sign() {
    let storage = memory_storage().await;
    let staff = create_user(&storage, "bursar", UserRole::Staff).await;

    let mut account_ids = Vec::new();
    for n in 0..3 {
        let student = create_student(&storage, &format!("ADM-30{n}"), None).await;
        let account = storage
            .create_account(CreateAccountRequest {
                student_id: student.id,
                account_type: "fees".to_string(),
            })
            .await
            .unwrap();
        account_ids.push(account.id);
    }

    let (account, tx) = storage
        .record_transaction(account_ids[0], deposit(200), staff.id)
        .await
        .unwrap();
    assert_eq!(account.current_balance, Decimal::new(200, 0));
    assert_eq!(tx.balance_after, Decimal::new(200, 0));

    storage
        .record_transaction(account_ids[1], deposit(50), staff.id)
        .await
        .unwrap();
    let (account, _) = storage
        .record_transaction(account_ids[1], withdrawal(80), staff.id)
        .await
        .unwrap();
    assert_eq!(account.current_balance, Decimal::new(-30, 0));

    let rows = storage
        .list_account_ledger(AccountListQuery::default())
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);

    let summary = summarize_balances(&rows);
    assert_eq!(summary.positive_count, 1);
    assert_eq!(summary.negative_count, 1);
    assert_eq!(summary.zero_count, 1);
    assert_eq!(summary.positive_total, Decimal::new(200, 0));
    assert_eq!(summary.negative_total, Decimal::new(-30, 0));
    assert_eq!(summary.net_total, Decimal::new(170, 0));
    assert_eq!(summary.total_deposits, Decimal::new(250, 0));
    assert_eq!(summary.total_withdrawals, Decimal::new(80, 0));
}

#[tokio::test]
async fn fractional_movements_that_cancel_land_in_zero_bucket() {
    let storage = memory_storage().await;
    let staff = create_user(&storage, "cashier", UserRole::Staff).await;
    let student = create_student(&storage, "ADM-400", None).await;
    let account = storage
        .create_account(CreateAccountRequest {
            student_id: student.id,
            account_type: "pocket money".to_string(),
        })
        .await
        .unwrap();

    for (kind, amount) in [
        (TransactionKind::Deposit, Decimal::new(1, 1)),
        (TransactionKind::Deposit, Decimal::new(2, 1)),
        (TransactionKind::Withdrawal, Decimal::new(3, 1)),
    ] {
        storage
            .record_transaction(
                account.id,
                RecordTransactionRequest {
                    kind,
                    amount,
                    receipt_number: None,
                    description: None,
                },
                staff.id,
            )
            .await
            .unwrap();
    }

    let rows = storage
        .list_account_ledger(AccountListQuery::default())
        .await
        .unwrap();
    assert!(rows[0].current_balance.is_zero());

    let summary = summarize_balances(&rows);
    assert_eq!(summary.zero_count, 1);
    assert_eq!(summary.positive_count, 0);
    assert_eq!(summary.negative_count, 0);
}

#[tokio::test]
async fn closed_account_rejects_transactions_and_linked_payments() {
    let storage = memory_storage().await;
    let staff = create_user(&storage, "bursar", UserRole::Staff).await;
    let student = create_student(&storage, "ADM-500", None).await;
    let account = storage
        .create_account(CreateAccountRequest {
            student_id: student.id,
            account_type: "fees".to_string(),
        })
        .await
        .unwrap();
    storage
        .record_transaction(account.id, deposit(40), staff.id)
        .await
        .unwrap();

    let closed = storage
        .update_account_status(account.id, AccountStatus::Closed)
        .await
        .unwrap()
        .expect("account exists");
    assert_eq!(closed.status, AccountStatus::Closed);

    let err = storage
        .record_transaction(account.id, withdrawal(10), staff.id)
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolAdminError::Validation(_)));

    // 关联账户的缴费整体回滚，不留下缴费记录
    let err = storage
        .create_payment(cash_payment(student.id, Some(account.id), "RCP-500-1", "2025-01-10"))
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolAdminError::Validation(_)));
    let payments = storage
        .list_payments_with_pagination(PaymentListQuery {
            student_id: Some(student.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(payments.pagination.total, 0);

    let unchanged = storage.get_account_by_id(account.id).await.unwrap().unwrap();
    assert_eq!(unchanged.current_balance, Decimal::new(40, 0));
    assert_eq!(
        storage.list_account_transactions(account.id).await.unwrap().len(),
        1
    );

    // 重新启用后可以继续存取
    storage
        .update_account_status(account.id, AccountStatus::Active)
        .await
        .unwrap();
    let (reopened, _) = storage
        .record_transaction(account.id, deposit(5), staff.id)
        .await
        .unwrap();
    assert_eq!(reopened.current_balance, Decimal::new(45, 0));

    assert!(
        storage
            .update_account_status(9999, AccountStatus::Closed)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn attendance_batch_with_unknown_student_rolls_back() {
    let storage = memory_storage().await;
    let teacher_user = create_user(&storage, "teacher9", UserRole::Teacher).await;
    let teacher = storage
        .create_teacher(CreateTeacherRequest {
            user_id: teacher_user.id,
            staff_number: "T-009".to_string(),
            full_name: "Akua Asante".to_string(),
            phone: None,
        })
        .await
        .unwrap();
    let class = create_class(&storage, "Form 1C", Some(teacher.id)).await;
    let student = create_student(&storage, "ADM-600", Some(class.id)).await;

    let marks = vec![
        AttendanceMark {
            student_id: student.id,
            status: AttendanceStatus::Present,
            remarks: None,
        },
        AttendanceMark {
            student_id: 9999,
            status: AttendanceStatus::Absent,
            remarks: None,
        },
    ];
    assert!(
        storage
            .upsert_attendance(sheet(class.id, teacher.id), marks)
            .await
            .is_err()
    );

    let records = storage
        .list_attendance(AttendanceListQuery {
            class_id: Some(class.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(records.len(), 0);
}

#[tokio::test]
async fn payment_export_query_is_capped_and_newest_first() {
    let storage = memory_storage().await;
    let student = create_student(&storage, "ADM-700", None).await;
    for (receipt, paid_on) in [
        ("RCP-700-1", "2025-01-05"),
        ("RCP-700-2", "2025-02-05"),
        ("RCP-700-3", "2025-03-05"),
    ] {
        storage
            .create_payment(cash_payment(student.id, None, receipt, paid_on))
            .await
            .unwrap();
    }

    let query = PaymentListQuery {
        student_id: Some(student.id),
        ..Default::default()
    };
    let capped = storage
        .list_payments_for_export(query.clone(), 2)
        .await
        .unwrap();
    let receipts: Vec<&str> = capped.iter().map(|p| p.receipt_number.as_str()).collect();
    assert_eq!(receipts, vec!["RCP-700-3", "RCP-700-2"]);

    let all = storage.list_payments_for_export(query, 10).await.unwrap();
    assert_eq!(all.len(), 3);
}
