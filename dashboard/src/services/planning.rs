//! Chick planning tables, one per product

use shared::{
    Availability, PlanningClientCreate, PlanningRow, PlanningTable, PlanningTableSettings,
    Product, RowId, WeekLabel,
};
use validator::Validate;

use crate::api::ApiClient;
use crate::config::GridConfig;
use crate::error::DashboardResult;
use crate::grid::{quantity, CommitOutcome, EditableGrid, PlanningClientSaver};

pub struct PlanningService {
    api: ApiClient,
    product: Product,
    table: PlanningTable,
    settings: PlanningTableSettings,
    grid: EditableGrid<(WeekLabel, RowId), i64, PlanningClientSaver>,
}

impl PlanningService {
    pub fn new(api: ApiClient, product: Product, timing: GridConfig) -> Self {
        let saver = PlanningClientSaver {
            api: api.clone(),
            product,
        };
        Self {
            api,
            product,
            table: PlanningTable::default(),
            settings: PlanningTableSettings::default(),
            grid: EditableGrid::new(saver, timing),
        }
    }

    pub fn product(&self) -> Product {
        self.product
    }

    pub fn table(&self) -> &PlanningTable {
        &self.table
    }

    pub fn grid(&self) -> &EditableGrid<(WeekLabel, RowId), i64, PlanningClientSaver> {
        &self.grid
    }

    pub fn show_sex_split(&self) -> bool {
        self.settings.show_sex_split
    }

    pub async fn refresh(&mut self) {
        self.table = self
            .api
            .planning_table(self.product)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to load {} planning: {}", self.product, e);
                PlanningTable::default()
            });
        self.settings = self
            .api
            .planning_table_settings(self.product)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to load {} planning settings: {}", self.product, e);
                PlanningTableSettings::default()
            });
        let clients = &self.table.clients;
        self.grid.load(self.table.data.iter().flat_map(|row| {
            clients.iter().map(move |client| {
                (
                    (WeekLabel::new(row.anno, row.settimana), client.id),
                    row.requested(client.id),
                )
            })
        }));
    }

    /// Rows with what is left after the client requests
    pub fn rows(&self) -> Vec<(&PlanningRow, Availability)> {
        self.table
            .data
            .iter()
            .map(|row| {
                (
                    row,
                    row.availability(&self.table.clients, self.settings.show_sex_split),
                )
            })
            .collect()
    }

    pub fn shortfall_weeks(&self) -> Vec<&str> {
        self.table.shortfall_weeks(self.settings.show_sex_split)
    }

    /// Flip the sex split and persist the choice
    pub async fn toggle_sex_split(&mut self) -> DashboardResult<bool> {
        let settings = PlanningTableSettings {
            show_sex_split: !self.settings.show_sex_split,
        };
        self.api
            .update_planning_table_settings(self.product, &settings)
            .await?;
        self.settings = settings;
        Ok(settings.show_sex_split)
    }

    pub async fn add_client(&mut self, client: PlanningClientCreate) -> DashboardResult<()> {
        client.validate()?;
        self.api.create_planning_client(self.product, &client).await?;
        tracing::info!("Added {} client {}", self.product, client.nome_cliente);
        self.refresh().await;
        Ok(())
    }

    pub async fn remove_client(&mut self, id: RowId) -> DashboardResult<()> {
        self.api.delete_planning_client(self.product, id).await?;
        self.refresh().await;
        Ok(())
    }

    /// Save the open request cell and refresh the row's sex totals
    pub async fn commit_request(&mut self, raw: &str) -> CommitOutcome {
        let key = self.grid.editing_key();
        let outcome = self.grid.commit_input(raw, quantity).await;
        if let (true, Some((week, client_id))) = (outcome.is_saved(), key) {
            let requested = self.grid.value(&(week, client_id)).unwrap_or_default();
            let clients = self.table.clients.clone();
            if let Some(row) = self.table.row_mut(week.year, week.week) {
                row.set_request(&clients, client_id, requested);
            }
        }
        outcome
    }
}
