use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SystemService;
use crate::config::AppConfig;
use crate::models::{ApiResponse, system::responses::SystemSettingsResponse};

pub(crate) fn settings_response(config: &AppConfig) -> SystemSettingsResponse {
    SystemSettingsResponse {
        system_name: config.app.system_name.clone(),
        school_name: config.school.name.clone(),
        currency: config.school.currency.clone(),
        session_idle_timeout: config.session.idle_timeout,
        environment: config.app.environment.clone(),
        log_level: config.app.log_level.clone(),
    }
}

/// 获取公开系统设置（只读）
pub async fn get_settings(
    service: &SystemService,
    _req: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let response = settings_response(service.get_config());

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Settings retrieved successfully",
    )))
}
