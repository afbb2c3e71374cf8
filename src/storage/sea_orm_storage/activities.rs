//! 操作日志存储操作

use super::{SeaOrmStorage, pagination_info};
use crate::entity::activity_logs::{ActiveModel, Column, Entity as ActivityLogs};
use crate::errors::{Result, SchoolAdminError};
use crate::models::{
    activities::{
        requests::{ActivityListQuery, NewActivity},
        responses::ActivityListResponse,
    },
    common::normalize_page,
};
use chrono::{NaiveDate, NaiveTime};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

/// YYYY-MM-DD 转为当天起止的 Unix 时间戳
fn day_bounds(date: &str) -> Result<(i64, i64)> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")?;
    let start = day.and_time(NaiveTime::MIN).and_utc().timestamp();
    Ok((start, start + 86_399))
}

impl SeaOrmStorage {
    pub async fn create_activity_impl(&self, activity: NewActivity) -> Result<()> {
        ActiveModel {
            user_id: Set(activity.user_id),
            activity_type: Set(activity.activity_type.to_string()),
            description: Set(activity.description),
            ip_address: Set(activity.ip_address),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| SchoolAdminError::database_operation(format!("写入操作日志失败: {e}")))?;

        Ok(())
    }

    pub async fn list_activities_with_pagination_impl(
        &self,
        query: ActivityListQuery,
    ) -> Result<ActivityListResponse> {
        let (page, size) = normalize_page(query.page, query.size, 20);

        let mut select = ActivityLogs::find();

        if let Some(activity_type) = query.activity_type {
            select = select.filter(Column::ActivityType.eq(activity_type.as_str()));
        }
        if let Some(user_id) = query.user_id {
            select = select.filter(Column::UserId.eq(user_id));
        }
        if let Some(ref from) = query.date_from {
            let (start, _) = day_bounds(from)?;
            select = select.filter(Column::CreatedAt.gte(start));
        }
        if let Some(ref to) = query.date_to {
            let (_, end) = day_bounds(to)?;
            select = select.filter(Column::CreatedAt.lte(end));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询操作日志总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询操作日志页数失败: {e}"))
        })?;
        let logs = paginator.fetch_page(page - 1).await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询操作日志失败: {e}"))
        })?;

        Ok(ActivityListResponse {
            items: logs.into_iter().map(|m| m.into_activity()).collect(),
            pagination: pagination_info(page, size, total, pages),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_bounds() {
        let (start, end) = day_bounds("1970-01-02").unwrap();
        assert_eq!(start, 86_400);
        assert_eq!(end, 86_400 + 86_399);
    }

    #[test]
    fn test_day_bounds_rejects_garbage() {
        assert!(day_bounds("02/01/1970").is_err());
    }
}
