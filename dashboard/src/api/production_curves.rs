//! Standard laying curves (`production-tables`)

use reqwest::Method;
use shared::{CurveCellUpdate, ProductionCurveTable};

use super::ApiClient;
use crate::error::DashboardResult;

impl ApiClient {
    pub async fn production_curves(&self) -> DashboardResult<ProductionCurveTable> {
        self.get("production-tables").await
    }

    pub async fn update_curve_cell(&self, update: &CurveCellUpdate) -> DashboardResult<()> {
        self.send_ack(Method::PUT, "production-tables", update).await
    }
}
