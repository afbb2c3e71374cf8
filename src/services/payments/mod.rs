pub mod create;
pub mod export;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use rand::Rng;
use std::sync::Arc;

use crate::models::payments::requests::{CreatePaymentRequest, PaymentListParams};
use crate::storage::Storage;

pub struct PaymentService {
    storage: Option<Arc<dyn Storage>>,
}

impl PaymentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 登记缴费；指定账户时同时入账
    pub async fn create_payment(
        &self,
        req: CreatePaymentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_payment(self, req, request).await
    }

    pub async fn get_payment(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::get_payment(self, id, request).await
    }

    pub async fn list_payments(
        &self,
        query: PaymentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_payments(self, query, request).await
    }

    pub async fn export_payments(
        &self,
        query: PaymentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        export::export_payments(self, query, request).await
    }
}

/// 收据号：`RCP-<毫秒时间戳>-<4 位随机数>`
pub fn generate_receipt_number() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u16 = rand::rng().random_range(0..10000);
    format!("RCP-{millis}-{suffix:04}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_number_format() {
        let receipt = generate_receipt_number();
        let parts: Vec<&str> = receipt.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "RCP");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 4);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
    }
}
