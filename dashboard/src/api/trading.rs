//! Egg purchases and sales (`trading`)

use reqwest::Method;
use shared::{
    RowId, TradeKind, TradingConfig, TradingConfigCreate, TradingConfigUpdate, TradingDataUpdate,
    TradingTableData,
};

use super::ApiClient;
use crate::error::DashboardResult;

impl ApiClient {
    pub async fn trading_config(&self, kind: TradeKind) -> DashboardResult<Vec<TradingConfig>> {
        self.get(&format!("trading/config/{}", kind)).await
    }

    pub async fn create_trading_config(&self, config: &TradingConfigCreate) -> DashboardResult<()> {
        self.send_ack(Method::POST, "trading/config", config).await
    }

    pub async fn update_trading_config(
        &self,
        id: RowId,
        config: &TradingConfigUpdate,
    ) -> DashboardResult<()> {
        self.send_ack(Method::PUT, &format!("trading/config/{}", id), config)
            .await
    }

    /// Soft-deletes the column on the backend
    pub async fn delete_trading_config(&self, id: RowId) -> DashboardResult<()> {
        self.delete(&format!("trading/config/{}", id)).await
    }

    pub async fn trading_data(&self, kind: TradeKind) -> DashboardResult<TradingTableData> {
        self.get(&format!("trading/data/{}", kind)).await
    }

    pub async fn update_trading_data(
        &self,
        kind: TradeKind,
        update: &TradingDataUpdate,
    ) -> DashboardResult<()> {
        self.send_ack(Method::PUT, &format!("trading/data/{}", kind), update)
            .await
    }
}
