//! 成绩权重存储操作

use super::SeaOrmStorage;
use crate::entity::grade_weights::{ActiveModel, Column, Entity as GradeWeights, Model};
use crate::errors::{Result, SchoolAdminError};
use crate::models::grades::entities::WeightConfig;
use sea_orm::sea_query::OnConflict;
use sea_orm::{EntityTrait, Set};

impl SeaOrmStorage {
    /// 读取已保存的权重，尚未设置时返回 None
    pub async fn get_grade_weights_impl(&self) -> Result<Option<WeightConfig>> {
        let result = GradeWeights::find_by_id(Model::SINGLETON_ID)
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询成绩权重失败: {e}")))?;

        Ok(result.map(|m| m.into_weights()))
    }

    /// 保存权重（单行覆盖）
    pub async fn save_grade_weights_impl(
        &self,
        weights: WeightConfig,
        updated_by: i64,
    ) -> Result<WeightConfig> {
        let model = ActiveModel {
            id: Set(Model::SINGLETON_ID),
            mid_weight: Set(weights.mid_weight),
            class_weight: Set(weights.class_weight),
            exam_weight: Set(weights.exam_weight),
            updated_by: Set(Some(updated_by)),
            updated_at: Set(chrono::Utc::now().timestamp()),
        };

        GradeWeights::insert(model)
            .on_conflict(
                OnConflict::column(Column::Id)
                    .update_columns([
                        Column::MidWeight,
                        Column::ClassWeight,
                        Column::ExamWeight,
                        Column::UpdatedBy,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("保存成绩权重失败: {e}")))?;

        Ok(weights)
    }
}
