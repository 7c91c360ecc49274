//! Cycle and planning-table settings (`settings`)

use reqwest::Method;
use shared::{CycleSettings, CycleSettingsUpdate, PlanningTableSettings, Product};

use super::ApiClient;
use crate::error::DashboardResult;

impl ApiClient {
    pub async fn cycle_settings(&self) -> DashboardResult<CycleSettings> {
        self.get("settings/cycle").await
    }

    pub async fn update_cycle_settings(
        &self,
        update: &CycleSettingsUpdate,
    ) -> DashboardResult<CycleSettings> {
        self.send(Method::PUT, "settings/cycle", update).await
    }

    pub async fn planning_table_settings(
        &self,
        product: Product,
    ) -> DashboardResult<PlanningTableSettings> {
        self.get(&format!(
            "settings/planning-table/{}",
            product.planning_table_id()
        ))
        .await
    }

    pub async fn update_planning_table_settings(
        &self,
        product: Product,
        settings: &PlanningTableSettings,
    ) -> DashboardResult<()> {
        self.send_ack(
            Method::PUT,
            &format!("settings/planning-table/{}", product.planning_table_id()),
            settings,
        )
        .await
    }
}
