use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::grades::requests::{ClassReportQuery, UpdateWeightsRequest};
use crate::models::users::entities::UserRole;
use crate::services::GradeService;

static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

pub async fn get_weights(req: HttpRequest) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_weights(&req).await
}

pub async fn update_weights(
    req: HttpRequest,
    body: web::Json<UpdateWeightsRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.update_weights(body.into_inner(), &req).await
}

pub async fn get_class_report(
    req: HttpRequest,
    query: web::Query<ClassReportQuery>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_class_report(query.into_inner(), &req).await
}

pub async fn export_class_report(
    req: HttpRequest,
    query: web::Query<ClassReportQuery>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .export_class_report(query.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_grade_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/weights")
                    .route(web::get().to(get_weights))
                    .route(
                        web::put()
                            .to(update_weights)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .route("/class-report", web::get().to(get_class_report))
            .route(
                "/class-report/export",
                web::get()
                    .to(export_class_report)
                    .wrap(middlewares::RateLimit::export()),
            ),
    );
}
