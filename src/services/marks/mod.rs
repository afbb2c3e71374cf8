pub mod list;
pub mod upsert;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::marks::requests::{MarkListQuery, UpsertMarksRequest};
use crate::storage::Storage;

pub struct MarkService {
    storage: Option<Arc<dyn Storage>>,
}

impl MarkService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 批量录入成绩，同一键重复提交时覆盖
    pub async fn upsert_marks(
        &self,
        req: UpsertMarksRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        upsert::upsert_marks(self, req, request).await
    }

    pub async fn list_marks(
        &self,
        query: MarkListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_marks(self, query, request).await
    }

    pub async fn delete_mark(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::delete_mark(self, id, request).await
    }
}
