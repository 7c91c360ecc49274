//! Incubation runs (`incubazioni`) and their egg batches
//!
//! These calls do not know whether a run is committed; the incubation
//! service checks that before reaching them.

use reqwest::Method;
use shared::{
    BatchCreate, BatchUpdate, Incubation, IncubationBatch, IncubationCreate, IncubationUpdate,
    RowId,
};

use super::ApiClient;
use crate::error::DashboardResult;

impl ApiClient {
    pub async fn list_incubations(&self) -> DashboardResult<Vec<Incubation>> {
        self.get("incubazioni").await
    }

    pub async fn get_incubation(&self, id: RowId) -> DashboardResult<Incubation> {
        self.get(&format!("incubazioni/{}", id)).await
    }

    pub async fn create_incubation(&self, data: &IncubationCreate) -> DashboardResult<()> {
        self.send_ack(Method::POST, "incubazioni", data).await
    }

    pub async fn update_incubation(
        &self,
        id: RowId,
        update: &IncubationUpdate,
    ) -> DashboardResult<Incubation> {
        self.send(Method::PUT, &format!("incubazioni/{}", id), update)
            .await
    }

    pub async fn delete_incubation(&self, id: RowId) -> DashboardResult<()> {
        self.delete(&format!("incubazioni/{}", id)).await
    }

    pub async fn list_batches(&self, incubation_id: RowId) -> DashboardResult<Vec<IncubationBatch>> {
        self.get(&format!("incubazioni/{}/batches", incubation_id))
            .await
    }

    pub async fn add_batch(
        &self,
        incubation_id: RowId,
        batch: &BatchCreate,
    ) -> DashboardResult<IncubationBatch> {
        self.send(
            Method::POST,
            &format!("incubazioni/{}/batches", incubation_id),
            batch,
        )
        .await
    }

    pub async fn update_batch(
        &self,
        incubation_id: RowId,
        batch_id: RowId,
        update: &BatchUpdate,
    ) -> DashboardResult<IncubationBatch> {
        self.send(
            Method::PATCH,
            &format!("incubazioni/{}/batches/{}", incubation_id, batch_id),
            update,
        )
        .await
    }

    pub async fn remove_batch(&self, incubation_id: RowId, batch_id: RowId) -> DashboardResult<()> {
        self.delete(&format!("incubazioni/{}/batches/{}", incubation_id, batch_id))
            .await
    }

    /// Deduct the used eggs from storage and lock the run
    pub async fn commit_incubation(&self, id: RowId) -> DashboardResult<()> {
        self.send_ack(
            Method::POST,
            &format!("incubazioni/{}/commit", id),
            &serde_json::json!({}),
        )
        .await
    }
}
