//! 成绩权重实体（单行）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grade_weights")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub mid_weight: f64,
    pub class_weight: f64,
    pub exam_weight: f64,
    pub updated_by: Option<i64>,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 权重表只保存一行
    pub const SINGLETON_ID: i64 = 1;

    pub fn into_weights(self) -> crate::models::grades::entities::WeightConfig {
        crate::models::grades::entities::WeightConfig::new(
            self.mid_weight,
            self.class_weight,
            self.exam_weight,
        )
    }
}
