use super::entities::WeightConfig;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct WeightsResponse {
    pub weights: WeightConfig,
    // 是否为配置文件中的默认值（数据库中尚无记录）
    pub is_default: bool,
}
