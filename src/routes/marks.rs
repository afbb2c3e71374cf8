use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::marks::requests::{MarkListQuery, UpsertMarksRequest};
use crate::models::users::entities::UserRole;
use crate::services::MarkService;
use crate::utils::SafeIDI64;

static MARK_SERVICE: Lazy<MarkService> = Lazy::new(MarkService::new_lazy);

pub async fn list_marks(
    req: HttpRequest,
    query: web::Query<MarkListQuery>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE.list_marks(query.into_inner(), &req).await
}

pub async fn upsert_marks(
    req: HttpRequest,
    body: web::Json<UpsertMarksRequest>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE.upsert_marks(body.into_inner(), &req).await
}

pub async fn delete_mark(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    MARK_SERVICE.delete_mark(id.0, &req).await
}

// 配置路由
pub fn configure_mark_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/marks")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route("", web::get().to(list_marks))
                    .route("", web::put().to(upsert_marks))
                    .route("/{id}", web::delete().to(delete_mark)),
            ),
    );
}
