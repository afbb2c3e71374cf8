use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::accounts::requests::{
    AccountListQuery, CreateAccountRequest, RecordTransactionRequest, UpdateAccountStatusRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AccountService;
use crate::utils::SafeIDI64;

static ACCOUNT_SERVICE: Lazy<AccountService> = Lazy::new(AccountService::new_lazy);

pub async fn list_accounts(
    req: HttpRequest,
    query: web::Query<AccountListQuery>,
) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE.list_accounts(query.into_inner(), &req).await
}

pub async fn create_account(
    req: HttpRequest,
    body: web::Json<CreateAccountRequest>,
) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE.create_account(body.into_inner(), &req).await
}

pub async fn get_account(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE.get_account(id.0, &req).await
}

pub async fn update_account_status(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateAccountStatusRequest>,
) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE
        .update_account_status(id.0, body.into_inner(), &req)
        .await
}

pub async fn list_transactions(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE.list_transactions(id.0, &req).await
}

pub async fn record_transaction(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<RecordTransactionRequest>,
) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE
        .record_transaction(id.0, body.into_inner(), &req)
        .await
}

pub async fn balance_report(
    req: HttpRequest,
    query: web::Query<AccountListQuery>,
) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE.balance_report(query.into_inner(), &req).await
}

// 配置路由
pub fn configure_account_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/accounts")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::office_roles()))
                    .route("", web::get().to(list_accounts))
                    .route("", web::post().to(create_account))
                    .route("/balance-report", web::get().to(balance_report))
                    .route("/{id}", web::get().to(get_account))
                    .route("/{id}/status", web::put().to(update_account_status))
                    .route("/{id}/transactions", web::get().to(list_transactions))
                    .route("/{id}/transactions", web::post().to(record_transaction)),
            ),
    );
}
