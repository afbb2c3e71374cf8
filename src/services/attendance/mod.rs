pub mod mark;
pub mod resolve;
pub mod summary;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::{
    AttendanceListQuery, AttendanceSummaryQuery, MarkAttendanceRequest,
};
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 提交一个班级某日的考勤，整批写入
    pub async fn mark_attendance(
        &self,
        req: MarkAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        mark::mark_attendance(self, req, request).await
    }

    pub async fn list_attendance(
        &self,
        query: AttendanceListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        summary::list_attendance(self, query, request).await
    }

    pub async fn attendance_summary(
        &self,
        query: AttendanceSummaryQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        summary::attendance_summary(self, query, request).await
    }
}
