use super::entities::ActivityType;
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct ActivityListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub activity_type: Option<ActivityType>,
    #[serde(default, deserialize_with = "crate::models::common::optional_i64")]
    pub user_id: Option<i64>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

// 审计日志查询（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct ActivityListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub activity_type: Option<ActivityType>,
    pub user_id: Option<i64>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl From<ActivityListParams> for ActivityListQuery {
    fn from(params: ActivityListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            activity_type: params.activity_type,
            user_id: params.user_id,
            date_from: params.date_from,
            date_to: params.date_to,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewActivity {
    pub user_id: Option<i64>,
    pub activity_type: ActivityType,
    pub description: String,
    pub ip_address: Option<String>,
}
