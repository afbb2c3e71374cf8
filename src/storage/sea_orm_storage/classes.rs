//! 班级存储操作

use super::{SeaOrmStorage, pagination_info};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{Result, SchoolAdminError};
use crate::models::{
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
    common::normalize_page,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            academic_year: Set(req.academic_year),
            teacher_id: Set(req.teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolAdminError::from_db("创建班级失败", e))?;

        Ok(result.into_class())
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 分页列出班级
    pub async fn list_classes_with_pagination_impl(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        let (page, size) = normalize_page(query.page, query.size, 10);

        let mut select = Classes::find();

        // 学年筛选
        if let Some(ref year) = query.academic_year
            && !year.trim().is_empty()
        {
            select = select.filter(Column::AcademicYear.eq(year.trim()));
        }

        // 班主任筛选
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(Column::Name.contains(search.trim()));
        }

        select = select
            .order_by_desc(Column::AcademicYear)
            .order_by_asc(Column::Name);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询班级总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询班级页数失败: {e}"))
        })?;
        let classes = paginator.fetch_page(page - 1).await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询班级列表失败: {e}"))
        })?;

        Ok(ClassListResponse {
            items: classes.into_iter().map(|m| m.into_class()).collect(),
            pagination: pagination_info(page, size, total, pages),
        })
    }

    /// 更新班级信息
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        // 先检查班级是否存在
        if self.get_class_by_id_impl(class_id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(class_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(academic_year) = update.academic_year {
            model.academic_year = Set(academic_year);
        }

        // Some(None) 表示取消班主任
        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(teacher_id);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolAdminError::from_db("更新班级失败", e))?;

        self.get_class_by_id_impl(class_id).await
    }

    /// 删除班级，班内学生的 class_id 置空
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("开启事务失败: {e}")))?;

        Students::update_many()
            .col_expr(
                StudentColumn::ClassId,
                sea_orm::sea_query::Expr::value(Option::<i64>::None),
            )
            .filter(StudentColumn::ClassId.eq(class_id))
            .exec(&txn)
            .await
            .map_err(|e| {
                SchoolAdminError::database_operation(format!("移出班级学生失败: {e}"))
            })?;

        let result = Classes::delete_by_id(class_id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("删除班级失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
