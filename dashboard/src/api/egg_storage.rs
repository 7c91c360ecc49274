//! Egg storage (`magazzino-uova`)

use reqwest::Method;
use shared::{EggStorageCreate, EggStorageEntry, EggStorageUpdate, RowId};

use super::ApiClient;
use crate::error::DashboardResult;

impl ApiClient {
    pub async fn list_egg_storage(&self) -> DashboardResult<Vec<EggStorageEntry>> {
        self.get("magazzino-uova").await
    }

    pub async fn create_egg_storage(&self, entry: &EggStorageCreate) -> DashboardResult<()> {
        self.send_ack(Method::POST, "magazzino-uova", entry).await
    }

    pub async fn update_egg_storage(
        &self,
        id: RowId,
        update: &EggStorageUpdate,
    ) -> DashboardResult<()> {
        self.send_ack(Method::PUT, &format!("magazzino-uova/{}", id), update)
            .await
    }

    pub async fn delete_egg_storage(&self, id: RowId) -> DashboardResult<()> {
        self.delete(&format!("magazzino-uova/{}", id)).await
    }
}
