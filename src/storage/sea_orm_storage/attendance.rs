//! 考勤存储操作

use super::SeaOrmStorage;
use crate::entity::attendance::{ActiveModel, Column, Entity as Attendance};
use crate::errors::{Result, SchoolAdminError};
use crate::models::attendance::{
    entities::{AttendanceMark, AttendanceRecord, AttendanceSheet},
    requests::AttendanceListQuery,
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};

impl SeaOrmStorage {
    /// 写入一个班级某天的考勤
    ///
    /// 整批在一个事务中执行，同一 (学生, 班级, 日期, 学年, 学期) 只保留最新状态。
    /// 任意一条失败时事务随 `txn` 丢弃而回滚。
    pub async fn upsert_attendance_impl(
        &self,
        sheet: AttendanceSheet,
        marks: Vec<AttendanceMark>,
    ) -> Result<i64> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("开启事务失败: {e}")))?;

        let mut saved = 0;
        for mark in marks {
            let model = ActiveModel {
                student_id: Set(mark.student_id),
                class_id: Set(sheet.class_id),
                teacher_id: Set(sheet.teacher_id),
                date: Set(sheet.date.clone()),
                academic_year: Set(sheet.academic_year.clone()),
                term: Set(sheet.term.clone()),
                status: Set(mark.status.to_string()),
                remarks: Set(mark.remarks),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };

            Attendance::insert(model)
                .on_conflict(
                    OnConflict::columns([
                        Column::StudentId,
                        Column::ClassId,
                        Column::Date,
                        Column::AcademicYear,
                        Column::Term,
                    ])
                    .update_columns([
                        Column::Status,
                        Column::Remarks,
                        Column::TeacherId,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
                )
                .exec_without_returning(&txn)
                .await
                .map_err(|e| {
                    tracing::error!(
                        "Attendance upsert failed for student {} in class {}: {}",
                        mark.student_id,
                        sheet.class_id,
                        e
                    );
                    SchoolAdminError::from_db("保存考勤失败", e)
                })?;
            saved += 1;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(saved)
    }

    pub async fn list_attendance_impl(
        &self,
        query: AttendanceListQuery,
    ) -> Result<Vec<AttendanceRecord>> {
        let mut select = Attendance::find();

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(ref date) = query.date {
            select = select.filter(Column::Date.eq(date.as_str()));
        }
        // ISO 日期字符串可直接按字典序比较
        if let Some(ref from) = query.date_from {
            select = select.filter(Column::Date.gte(from.as_str()));
        }
        if let Some(ref to) = query.date_to {
            select = select.filter(Column::Date.lte(to.as_str()));
        }
        if let Some(ref year) = query.academic_year {
            select = select.filter(Column::AcademicYear.eq(year.as_str()));
        }
        if let Some(ref term) = query.term {
            select = select.filter(Column::Term.eq(term.as_str()));
        }

        let records = select
            .order_by_desc(Column::Date)
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询考勤失败: {e}")))?;

        Ok(records.into_iter().map(|m| m.into_attendance()).collect())
    }
}
