//! 教师档案存储操作

use super::{SeaOrmStorage, pagination_info};
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::errors::{Result, SchoolAdminError};
use crate::models::{
    common::normalize_page,
    teachers::{
        entities::{TeacherProfile, TeacherStatus},
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
        responses::TeacherListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn create_teacher_impl(&self, req: CreateTeacherRequest) -> Result<TeacherProfile> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            user_id: Set(req.user_id),
            staff_number: Set(req.staff_number),
            full_name: Set(req.full_name),
            phone: Set(req.phone),
            status: Set(TeacherStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolAdminError::from_db("创建教师档案失败", e))?;

        Ok(result.into_teacher())
    }

    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<TeacherProfile>> {
        let result = Teachers::find_by_id(id).one(&self.db).await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询教师档案失败: {e}"))
        })?;

        Ok(result.map(|m| m.into_teacher()))
    }

    pub async fn get_teacher_by_user_id_impl(
        &self,
        user_id: i64,
    ) -> Result<Option<TeacherProfile>> {
        let result = Teachers::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                SchoolAdminError::database_operation(format!("查询教师档案失败: {e}"))
            })?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 按 ID 升序取第一个在职教师
    pub async fn find_any_active_teacher_impl(&self) -> Result<Option<TeacherProfile>> {
        let result = Teachers::find()
            .filter(Column::Status.eq(TeacherStatus::Active.as_str()))
            .order_by_asc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| {
                SchoolAdminError::database_operation(format!("查询在职教师失败: {e}"))
            })?;

        Ok(result.map(|m| m.into_teacher()))
    }

    pub async fn list_teachers_with_pagination_impl(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse> {
        let (page, size) = normalize_page(query.page, query.size, 10);

        let mut select = Teachers::find();

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let search = search.trim();
            select = select.filter(
                Condition::any()
                    .add(Column::FullName.contains(search))
                    .add(Column::StaffNumber.contains(search)),
            );
        }

        let paginator = select
            .order_by_asc(Column::FullName)
            .paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询教师总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询教师页数失败: {e}"))
        })?;
        let teachers = paginator.fetch_page(page - 1).await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询教师列表失败: {e}"))
        })?;

        Ok(TeacherListResponse {
            items: teachers.into_iter().map(|m| m.into_teacher()).collect(),
            pagination: pagination_info(page, size, total, pages),
        })
    }

    pub async fn update_teacher_impl(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<TeacherProfile>> {
        if self.get_teacher_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(full_name) = update.full_name {
            model.full_name = Set(full_name);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolAdminError::from_db("更新教师档案失败", e))?;

        self.get_teacher_by_id_impl(id).await
    }

    /// 删除教师档案，所带班级的班主任置空（外键 SET NULL）
    pub async fn delete_teacher_impl(&self, id: i64) -> Result<bool> {
        let result = Teachers::delete_by_id(id).exec(&self.db).await.map_err(|e| {
            SchoolAdminError::database_operation(format!("删除教师档案失败: {e}"))
        })?;

        Ok(result.rows_affected > 0)
    }
}
