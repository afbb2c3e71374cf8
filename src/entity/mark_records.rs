//! 原始成绩实体（期中、平时、期末三类共用一张表）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "mark_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub class_id: i64,
    pub term: String,
    pub academic_year: String,
    pub component: String,
    pub total_marks: f64,
    pub recorded_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_mark_record(self) -> crate::models::marks::entities::MarkRecord {
        use crate::models::marks::entities::{MarkComponent, MarkRecord};

        MarkRecord {
            id: self.id,
            student_id: self.student_id,
            subject_id: self.subject_id,
            class_id: self.class_id,
            term: self.term,
            academic_year: self.academic_year,
            component: self
                .component
                .parse::<MarkComponent>()
                .unwrap_or(MarkComponent::Exam),
            total_marks: self.total_marks,
            recorded_by: self.recorded_by,
            created_at: super::timestamp_to_datetime(self.created_at),
            updated_at: super::timestamp_to_datetime(self.updated_at),
        }
    }
}
