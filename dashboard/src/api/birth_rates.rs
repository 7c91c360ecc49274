//! Hatch-rate tables (`birth-rates`)

use reqwest::Method;
use shared::{BirthRateMatrix, BirthRateUpdate, PurchaseBirthRateUpdate, PurchaseBirthRates};

use super::ApiClient;
use crate::error::DashboardResult;

impl ApiClient {
    pub async fn birth_rates(&self) -> DashboardResult<BirthRateMatrix> {
        self.get("birth-rates").await
    }

    pub async fn update_birth_rate(&self, update: &BirthRateUpdate) -> DashboardResult<()> {
        self.send_ack(Method::PUT, "birth-rates", update).await
    }

    pub async fn purchase_birth_rates(&self) -> DashboardResult<PurchaseBirthRates> {
        self.get("birth-rates/purchase").await
    }

    pub async fn update_purchase_birth_rate(
        &self,
        update: &PurchaseBirthRateUpdate,
    ) -> DashboardResult<()> {
        self.send_ack(Method::PUT, "birth-rates/purchase", update)
            .await
    }
}
