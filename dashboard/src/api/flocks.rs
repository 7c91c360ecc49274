//! Flocks (`allevamenti/lotti`) and their weekly cycle rows

use reqwest::Method;
use serde_json::Value;
use shared::{
    FarmStructure, Lotto, LottoCreate, LottoSearchResult, RowId, WeeklyData, WeeklyDataCreate,
    WeeklyDataSheet,
};

use super::{ApiClient, DataEnvelope};
use crate::error::DashboardResult;

impl ApiClient {
    pub async fn list_lotti(&self) -> DashboardResult<Vec<Lotto>> {
        self.get("allevamenti/lotti").await
    }

    pub async fn create_lotto(&self, lotto: &LottoCreate) -> DashboardResult<()> {
        self.send_ack(Method::POST, "allevamenti/lotti", lotto).await
    }

    /// Partial update; `fields` maps wire names to new values
    pub async fn update_lotto(&self, id: RowId, fields: &Value) -> DashboardResult<()> {
        self.send_ack(Method::PUT, &format!("allevamenti/lotti/{}", id), fields)
            .await
    }

    pub async fn delete_lotto(&self, id: RowId) -> DashboardResult<()> {
        self.delete(&format!("allevamenti/lotti/{}", id)).await
    }

    pub async fn search_lotto(&self, code: &str) -> DashboardResult<LottoSearchResult> {
        self.get(&format!("allevamenti/lotti/search/{}", code.trim()))
            .await
    }

    pub async fn farm_structure(&self) -> DashboardResult<FarmStructure> {
        self.get("allevamenti/farms").await
    }

    pub async fn weekly_data(&self, lotto_id: RowId) -> DashboardResult<WeeklyDataSheet> {
        self.get(&format!("allevamenti/lotti/{}/weekly-data", lotto_id))
            .await
    }

    pub async fn add_weekly_row(
        &self,
        lotto_id: RowId,
        row: &WeeklyDataCreate,
    ) -> DashboardResult<WeeklyData> {
        let envelope: DataEnvelope<WeeklyData> = self
            .send(
                Method::POST,
                &format!("allevamenti/lotti/{}/weekly-data", lotto_id),
                row,
            )
            .await?;
        Ok(envelope.data)
    }

    pub async fn update_weekly_row(
        &self,
        lotto_id: RowId,
        row_id: RowId,
        fields: &Value,
    ) -> DashboardResult<()> {
        self.send_ack(
            Method::PUT,
            &format!("allevamenti/lotti/{}/weekly-data/{}", lotto_id, row_id),
            fields,
        )
        .await
    }

    pub async fn delete_weekly_row(&self, lotto_id: RowId, row_id: RowId) -> DashboardResult<()> {
        self.delete(&format!("allevamenti/lotti/{}/weekly-data/{}", lotto_id, row_id))
            .await
    }
}
