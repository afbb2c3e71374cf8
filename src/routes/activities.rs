use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::activities::requests::ActivityListParams;
use crate::models::users::entities::UserRole;
use crate::services::ActivityService;

static ACTIVITY_SERVICE: Lazy<ActivityService> = Lazy::new(ActivityService::new_lazy);

pub async fn list_activities(
    req: HttpRequest,
    query: web::Query<ActivityListParams>,
) -> ActixResult<HttpResponse> {
    ACTIVITY_SERVICE
        .list_activities(query.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_activity_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/activities")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_activities)),
            ),
    );
}
