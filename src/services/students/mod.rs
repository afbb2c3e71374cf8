pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::students::requests::{
    CreateStudentRequest, StudentListParams, UpdateStudentRequest,
};
use crate::services::{bad_request, error_response};
use crate::storage::Storage;
use crate::utils::validate::parse_iso_date;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_students(
        &self,
        query: StudentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, query, request).await
    }

    pub async fn get_student(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::get_student(self, id, request).await
    }

    // 学籍登记
    pub async fn create_student(
        &self,
        req: CreateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, req, request).await
    }

    pub async fn update_student(
        &self,
        id: i64,
        req: UpdateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, id, req, request).await
    }

    // 删除学生，同时删除其成绩、考勤、账户、缴费与发票
    pub async fn delete_student(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_student(self, id, request).await
    }
}

/// 出生日期（可选）必须是 `YYYY-MM-DD`
fn check_date_of_birth(value: Option<&str>) -> Result<(), HttpResponse> {
    match value {
        Some(dob) if !dob.trim().is_empty() => parse_iso_date(dob)
            .map(|_| ())
            .map_err(|msg| bad_request(ErrorCode::BadRequest, msg)),
        _ => Ok(()),
    }
}

/// 分班时班级必须存在
async fn check_class(storage: &dyn Storage, class_id: Option<i64>) -> Result<(), HttpResponse> {
    let Some(class_id) = class_id else {
        return Ok(());
    };
    match storage.get_class_by_id(class_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(bad_request(
            ErrorCode::ClassNotFound,
            format!("Class #{class_id} does not exist"),
        )),
        Err(e) => Err(error_response(
            "Failed to look up class",
            e,
            ErrorCode::ClassNotFound,
        )),
    }
}
