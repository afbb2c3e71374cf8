//! 原始成绩存储操作

use super::SeaOrmStorage;
use crate::entity::mark_records::{ActiveModel, Column, Entity as MarkRecords};
use crate::errors::{Result, SchoolAdminError};
use crate::models::marks::{
    entities::MarkRecord,
    requests::{MarkListQuery, UpsertMarksRequest},
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};

impl SeaOrmStorage {
    /// 批量写入成绩（同一事务），同键已存在时覆盖分数
    pub async fn upsert_marks_impl(&self, req: UpsertMarksRequest, recorded_by: i64) -> Result<i64> {
        let now = chrono::Utc::now().timestamp();
        let component = req.component.to_string();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("开启事务失败: {e}")))?;

        let mut saved = 0;
        for entry in req.entries {
            let model = ActiveModel {
                student_id: Set(entry.student_id),
                subject_id: Set(req.subject_id),
                class_id: Set(req.class_id),
                term: Set(req.term.clone()),
                academic_year: Set(req.academic_year.clone()),
                component: Set(component.clone()),
                total_marks: Set(entry.total_marks),
                recorded_by: Set(Some(recorded_by)),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };

            MarkRecords::insert(model)
                .on_conflict(
                    OnConflict::columns([
                        Column::StudentId,
                        Column::SubjectId,
                        Column::ClassId,
                        Column::Term,
                        Column::AcademicYear,
                        Column::Component,
                    ])
                    .update_columns([Column::TotalMarks, Column::RecordedBy, Column::UpdatedAt])
                    .to_owned(),
                )
                .exec_without_returning(&txn)
                .await
                .map_err(|e| SchoolAdminError::from_db("保存成绩失败", e))?;
            saved += 1;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(saved)
    }

    pub async fn list_marks_impl(&self, query: MarkListQuery) -> Result<Vec<MarkRecord>> {
        let mut select = MarkRecords::find();

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(ref term) = query.term {
            select = select.filter(Column::Term.eq(term.as_str()));
        }
        if let Some(ref year) = query.academic_year {
            select = select.filter(Column::AcademicYear.eq(year.as_str()));
        }
        if let Some(component) = query.component {
            select = select.filter(Column::Component.eq(component.as_str()));
        }

        let marks = select
            .order_by_asc(Column::StudentId)
            .order_by_asc(Column::SubjectId)
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(marks.into_iter().map(|m| m.into_mark_record()).collect())
    }

    pub async fn delete_mark_impl(&self, id: i64) -> Result<bool> {
        let result = MarkRecords::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("删除成绩失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
