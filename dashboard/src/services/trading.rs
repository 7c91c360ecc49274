//! Egg purchases and sales per week and counterpart

use shared::{
    RowId, TradeKind, TradingConfig, TradingConfigCreate, TradingConfigUpdate, TradingTableData,
    WeekLabel,
};
use validator::Validate;

use crate::api::ApiClient;
use crate::config::GridConfig;
use crate::error::DashboardResult;
use crate::grid::{EditableGrid, TradingCellSaver};

pub struct TradingService {
    api: ApiClient,
    kind: TradeKind,
    timing: GridConfig,
    configs: Vec<TradingConfig>,
    data: TradingTableData,
    grid: EditableGrid<(WeekLabel, String), i64, TradingCellSaver>,
}

impl TradingService {
    pub fn new(api: ApiClient, kind: TradeKind, timing: GridConfig) -> Self {
        let grid = Self::build_grid(&api, kind, Vec::new(), timing);
        Self {
            api,
            kind,
            timing,
            configs: Vec::new(),
            data: TradingTableData::default(),
            grid,
        }
    }

    fn build_grid(
        api: &ApiClient,
        kind: TradeKind,
        configs: Vec<TradingConfig>,
        timing: GridConfig,
    ) -> EditableGrid<(WeekLabel, String), i64, TradingCellSaver> {
        EditableGrid::new(
            TradingCellSaver {
                api: api.clone(),
                kind,
                configs,
            },
            timing,
        )
    }

    pub fn kind(&self) -> TradeKind {
        self.kind
    }

    pub fn configs(&self) -> &[TradingConfig] {
        &self.configs
    }

    pub fn data(&self) -> &TradingTableData {
        &self.data
    }

    pub fn grid(&self) -> &EditableGrid<(WeekLabel, String), i64, TradingCellSaver> {
        &self.grid
    }

    /// Refetch the columns and the weekly quantities. The grid is rebuilt
    /// because its saver resolves columns against the config list.
    pub async fn refresh(&mut self) {
        self.configs = self
            .api
            .trading_config(self.kind)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to load {} config: {}", self.kind, e);
                Vec::new()
            });
        self.data = self.api.trading_data(self.kind).await.unwrap_or_else(|e| {
            tracing::warn!("Failed to load {} data: {}", self.kind, e);
            TradingTableData::default()
        });

        self.grid = Self::build_grid(&self.api, self.kind, self.configs.clone(), self.timing);
        let columns: Vec<&str> = self.data.quantity_columns().collect();
        let mut cells = Vec::new();
        for row in &self.data.data {
            let Some(week) = row.week() else {
                continue;
            };
            for column in &columns {
                cells.push(((week, column.to_string()), row.quantity(column)));
            }
        }
        self.grid.load(cells);
    }

    pub fn week_total(&self, week: WeekLabel) -> i64 {
        self.data.week_total(week)
    }

    pub async fn add_config(&mut self, azienda: &str, prodotto: &str) -> DashboardResult<()> {
        let config = TradingConfigCreate {
            tipo: self.kind,
            azienda: azienda.trim().to_string(),
            prodotto: prodotto.trim().to_string(),
        };
        config.validate()?;
        self.api.create_trading_config(&config).await?;
        tracing::info!("Added {} column {}_{}", self.kind, config.azienda, config.prodotto);
        self.refresh().await;
        Ok(())
    }

    pub async fn update_config(
        &mut self,
        id: RowId,
        update: TradingConfigUpdate,
    ) -> DashboardResult<()> {
        update.validate()?;
        self.api.update_trading_config(id, &update).await?;
        self.refresh().await;
        Ok(())
    }

    pub async fn remove_config(&mut self, id: RowId) -> DashboardResult<()> {
        self.api.delete_trading_config(id).await?;
        self.refresh().await;
        Ok(())
    }
}
