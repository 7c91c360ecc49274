//! Hen (`genetics`) and rooster (`genetics-gallo`) genetics

use reqwest::Method;
use shared::{HenGenetics, HenGeneticsInput, RoosterGenetics, RoosterGeneticsInput, RowId};

use super::ApiClient;
use crate::error::DashboardResult;

impl ApiClient {
    pub async fn hen_genetics(&self) -> DashboardResult<Vec<HenGenetics>> {
        self.get("genetics").await
    }

    pub async fn create_hen_genetics(&self, input: &HenGeneticsInput) -> DashboardResult<()> {
        self.send_ack(Method::POST, "genetics", input).await
    }

    pub async fn update_hen_genetics(
        &self,
        id: RowId,
        input: &HenGeneticsInput,
    ) -> DashboardResult<()> {
        self.send_ack(Method::PUT, &format!("genetics/{}", id), input)
            .await
    }

    pub async fn delete_hen_genetics(&self, id: RowId) -> DashboardResult<()> {
        self.delete(&format!("genetics/{}", id)).await
    }

    pub async fn rooster_genetics(&self) -> DashboardResult<Vec<RoosterGenetics>> {
        self.get("genetics-gallo").await
    }

    pub async fn create_rooster_genetics(&self, input: &RoosterGeneticsInput) -> DashboardResult<()> {
        self.send_ack(Method::POST, "genetics-gallo", input).await
    }

    pub async fn update_rooster_genetics(
        &self,
        id: RowId,
        input: &RoosterGeneticsInput,
    ) -> DashboardResult<()> {
        self.send_ack(Method::PUT, &format!("genetics-gallo/{}", id), input)
            .await
    }

    pub async fn delete_rooster_genetics(&self, id: RowId) -> DashboardResult<()> {
        self.delete(&format!("genetics-gallo/{}", id)).await
    }
}
