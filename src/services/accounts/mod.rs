pub mod ledger;
pub mod manage;
pub mod transactions;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::accounts::requests::{
    AccountListQuery, CreateAccountRequest, RecordTransactionRequest, UpdateAccountStatusRequest,
};
use crate::storage::Storage;

pub struct AccountService {
    storage: Option<Arc<dyn Storage>>,
}

impl AccountService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn create_account(
        &self,
        req: CreateAccountRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::create_account(self, req, request).await
    }

    pub async fn list_accounts(
        &self,
        query: AccountListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::list_accounts(self, query, request).await
    }

    pub async fn get_account(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        manage::get_account(self, id, request).await
    }

    pub async fn update_account_status(
        &self,
        id: i64,
        req: UpdateAccountStatusRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_account_status(self, id, req, request).await
    }

    // 存款 / 取款
    pub async fn record_transaction(
        &self,
        account_id: i64,
        req: RecordTransactionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        transactions::record_transaction(self, account_id, req, request).await
    }

    pub async fn list_transactions(
        &self,
        account_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        transactions::list_transactions(self, account_id, request).await
    }

    // 余额报表
    pub async fn balance_report(
        &self,
        query: AccountListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        ledger::balance_report(self, query, request).await
    }
}
