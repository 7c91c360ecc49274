//! Chick planning tables (`chick-planning`)

use reqwest::Method;
use serde::Deserialize;
use shared::{ClientDataUpdate, PlanningClient, PlanningClientCreate, PlanningTable, Product, RowId};

use super::ApiClient;
use crate::error::DashboardResult;

#[derive(Deserialize)]
struct ClientsEnvelope {
    #[serde(default)]
    clients: Vec<PlanningClient>,
}

impl ApiClient {
    pub async fn planning_table(&self, product: Product) -> DashboardResult<PlanningTable> {
        self.get(&format!("chick-planning/{}-extended", product.key()))
            .await
    }

    pub async fn planning_clients(&self, product: Product) -> DashboardResult<Vec<PlanningClient>> {
        let envelope: ClientsEnvelope = self
            .get(&format!("chick-planning/{}/clients", product.key()))
            .await?;
        Ok(envelope.clients)
    }

    pub async fn create_planning_client(
        &self,
        product: Product,
        client: &PlanningClientCreate,
    ) -> DashboardResult<()> {
        self.send_ack(
            Method::POST,
            &format!("chick-planning/{}/clients", product.key()),
            client,
        )
        .await
    }

    pub async fn delete_planning_client(&self, product: Product, id: RowId) -> DashboardResult<()> {
        self.delete(&format!("chick-planning/{}/clients/{}", product.key(), id))
            .await
    }

    pub async fn update_client_data(
        &self,
        product: Product,
        update: &ClientDataUpdate,
    ) -> DashboardResult<()> {
        self.send_ack(
            Method::PUT,
            &format!("chick-planning/{}/client-data", product.key()),
            update,
        )
        .await
    }
}
