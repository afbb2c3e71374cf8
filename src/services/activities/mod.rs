pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::warn;

use crate::models::activities::{entities::ActivityType, requests::ActivityListParams, requests::NewActivity};
use crate::storage::Storage;

pub struct ActivityService {
    storage: Option<Arc<dyn Storage>>,
}

impl ActivityService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 查询操作日志
    pub async fn list_activities(
        &self,
        query: ActivityListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_activities(self, query, request).await
    }
}

/// 追加一条操作日志
///
/// 写入失败只记录告警，不影响调用方的请求结果。
pub async fn log_activity(
    storage: &dyn Storage,
    user_id: Option<i64>,
    activity_type: ActivityType,
    description: impl Into<String>,
    ip_address: Option<String>,
) {
    let activity = NewActivity {
        user_id,
        activity_type,
        description: description.into(),
        ip_address,
    };
    if let Err(e) = storage.create_activity(activity.clone()).await {
        warn!(
            "Failed to record {} activity '{}': {}",
            activity.activity_type, activity.description, e
        );
    }
}

/// 以当前请求的用户与 IP 记录操作日志
pub(crate) async fn log_request_activity(
    storage: &dyn Storage,
    request: &HttpRequest,
    activity_type: ActivityType,
    description: impl Into<String>,
) {
    let user_id = crate::middlewares::RequireJWT::extract_user_id(request);
    log_activity(
        storage,
        user_id,
        activity_type,
        description,
        super::client_ip(request),
    )
    .await;
}
