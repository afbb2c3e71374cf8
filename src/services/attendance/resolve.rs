//! 考勤记录的教师归属
//!
//! 教师账号只能用自己的在职档案；管理员和行政人员依次尝试：
//! 班级的班主任 → 自己的在职档案 → 任一在职教师。

use crate::errors::{Result, SchoolAdminError};
use crate::models::classes::entities::Class;
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;

pub async fn resolve_teacher_id(storage: &dyn Storage, user: &User, class: &Class) -> Result<i64> {
    let own_profile = storage
        .get_teacher_by_user_id(user.id)
        .await?
        .filter(|profile| profile.is_active());

    if user.role == UserRole::Teacher {
        return own_profile.map(|profile| profile.id).ok_or_else(|| {
            SchoolAdminError::authorization("An active teacher profile is required to mark attendance")
        });
    }

    if let Some(teacher_id) = class.teacher_id {
        return Ok(teacher_id);
    }
    if let Some(profile) = own_profile {
        return Ok(profile.id);
    }
    match storage.find_any_active_teacher().await? {
        Some(profile) => Ok(profile.id),
        None => Err(SchoolAdminError::not_found("no teacher available")),
    }
}
