pub mod calculator;
pub mod export;
pub mod report;
pub mod weights;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::grades::entities::WeightConfig;
use crate::models::grades::requests::{ClassReportQuery, TermQuery, UpdateWeightsRequest};
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn get_weights(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        weights::get_weights(self, request).await
    }

    pub async fn update_weights(
        &self,
        req: UpdateWeightsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        weights::update_weights(self, req, request).await
    }

    pub async fn get_transcript(
        &self,
        student_id: i64,
        query: TermQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        report::get_transcript(self, student_id, query, request).await
    }

    pub async fn get_class_report(
        &self,
        query: ClassReportQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        report::get_class_report(self, query, request).await
    }

    // 导出班级成绩总表（XLSX）
    pub async fn export_class_report(
        &self,
        query: ClassReportQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        export::export_class_report(self, query, request).await
    }
}

/// 读取当前权重；数据库中没有记录时使用配置的默认值
///
/// 返回 `(权重, 是否为默认值)`
pub async fn load_weights(storage: &dyn Storage) -> Result<(WeightConfig, bool)> {
    match storage.get_grade_weights().await? {
        Some(weights) => Ok((weights, false)),
        None => Ok((
            WeightConfig::from(&AppConfig::get().grading.default_weights),
            true,
        )),
    }
}
