//! Chick planning tables (T010-T013) and their client columns

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::forecast::{availability, Availability, ClientRequest};
use crate::types::{RowId, SexType};

/// A customer with its own column in a planning table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanningClient {
    pub id: RowId,
    pub nome_cliente: String,
    #[serde(default)]
    pub sex_type: SexType,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlanningClientCreate {
    #[validate(length(min = 1))]
    pub nome_cliente: String,
    pub sex_type: SexType,
}

/// One birth week of a planning table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanningRow {
    /// Birth week, `YYYY/WW`
    pub settimana_nascita: String,
    pub anno: i32,
    pub settimana: i32,
    #[serde(default)]
    pub uova_prodotte: i64,
    #[serde(default)]
    pub uova_acquistate: i64,
    #[serde(default)]
    pub uova_vendute: i64,
    #[serde(default)]
    pub uova_totali: i64,
    #[serde(default)]
    pub animali_possibili: i64,
    /// Requested chicks per client id
    #[serde(default)]
    pub client_values: BTreeMap<RowId, i64>,
    #[serde(default)]
    pub totale_maschi: i64,
    #[serde(default)]
    pub totale_femmine: i64,
}

impl PlanningRow {
    pub fn requested(&self, client_id: RowId) -> i64 {
        self.client_values.get(&client_id).copied().unwrap_or(0)
    }

    /// Remaining chicks after the clients' requests
    pub fn availability(&self, clients: &[PlanningClient], show_sex_split: bool) -> Availability {
        let requests: Vec<ClientRequest> = clients
            .iter()
            .map(|c| ClientRequest {
                sex_type: c.sex_type,
                quantity: self.requested(c.id),
            })
            .collect();
        availability(self.animali_possibili, &requests, show_sex_split)
    }

    /// Store a client's request and refresh the male/female totals
    pub fn set_request(&mut self, clients: &[PlanningClient], client_id: RowId, quantity: i64) {
        self.client_values.insert(client_id, quantity);
        if let Availability::Split { maschi, femmine } = self.availability(clients, true) {
            self.totale_maschi = maschi;
            self.totale_femmine = femmine;
        }
    }
}

/// A planning table as served by `chick-planning/{product}-extended`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlanningTable {
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub has_vendite: bool,
    #[serde(default)]
    pub has_acquisti: bool,
    #[serde(default)]
    pub clients: Vec<PlanningClient>,
    #[serde(default)]
    pub data: Vec<PlanningRow>,
}

impl PlanningTable {
    pub fn row_mut(&mut self, anno: i32, settimana: i32) -> Option<&mut PlanningRow> {
        self.data
            .iter_mut()
            .find(|r| r.anno == anno && r.settimana == settimana)
    }

    /// Birth weeks where the requests exceed what can hatch
    pub fn shortfall_weeks(&self, show_sex_split: bool) -> Vec<&str> {
        self.data
            .iter()
            .filter(|row| row.availability(&self.clients, show_sex_split).is_short())
            .map(|row| row.settimana_nascita.as_str())
            .collect()
    }
}

/// Requested quantity of one client in one birth week
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientDataUpdate {
    pub anno: i32,
    pub settimana: i32,
    pub cliente_id: RowId,
    pub quantita: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clients() -> Vec<PlanningClient> {
        vec![
            PlanningClient { id: 1, nome_cliente: "Guidi".to_string(), sex_type: SexType::Entrambi },
            PlanningClient { id: 2, nome_cliente: "Amadori".to_string(), sex_type: SexType::Entrambi },
        ]
    }

    fn row() -> PlanningRow {
        serde_json::from_value(serde_json::json!({
            "settimana_nascita": "2025/28",
            "anno": 2025,
            "settimana": 28,
            "uova_prodotte": 10000,
            "uova_totali": 10000,
            "animali_possibili": 8200,
            "client_values": {"1": 2000},
            "totale_maschi": 3100,
            "totale_femmine": 3100
        }))
        .unwrap()
    }

    #[test]
    fn test_client_values_have_numeric_keys() {
        let row = row();
        assert_eq!(row.requested(1), 2000);
        assert_eq!(row.requested(2), 0);
    }

    #[test]
    fn test_set_request_refreshes_totals() {
        let clients = clients();
        let mut row = row();
        row.set_request(&clients, 2, 2000);
        assert_eq!(row.totale_maschi, 2100);
        assert_eq!(row.totale_femmine, 2100);
        assert_eq!(
            row.availability(&clients, false),
            Availability::Combined(8200 - 4000)
        );
    }

    #[test]
    fn test_shortfall_weeks() {
        let mut table = PlanningTable {
            product: "ross".to_string(),
            clients: clients(),
            data: vec![row()],
            ..Default::default()
        };
        assert!(table.shortfall_weeks(true).is_empty());
        let clients = table.clients.clone();
        if let Some(r) = table.row_mut(2025, 28) {
            r.set_request(&clients, 2, 9000);
        }
        assert_eq!(table.shortfall_weeks(true), vec!["2025/28"]);
    }
}
