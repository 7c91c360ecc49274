//! Egg storage ("Magazzino uova")

use std::collections::BTreeMap;

use chrono::NaiveDate;
use shared::{
    sort_by_giacenza, totals_by_product, EggStorageCreate, EggStorageEntry, EggStorageField, RowId,
};
use validator::Validate;

use crate::api::ApiClient;
use crate::config::GridConfig;
use crate::error::DashboardResult;
use crate::grid::{CellValue, EditableGrid, EggStorageSaver};

/// A storage batch as displayed
#[derive(Debug, Clone, PartialEq)]
pub struct StorageRow {
    pub entry: EggStorageEntry,
    pub giacenza: i64,
    pub stale: bool,
}

fn storage_cell(entry: &EggStorageEntry, field: EggStorageField) -> CellValue {
    match field {
        EggStorageField::Prodotto => CellValue::Text(entry.prodotto.clone()),
        EggStorageField::Nome => CellValue::Text(entry.nome.clone()),
        EggStorageField::Origine => CellValue::Text(entry.origine.clone()),
        EggStorageField::Numero => CellValue::Integer(entry.display_quantity()),
        EggStorageField::Eta => CellValue::Integer(i64::from(entry.eta)),
        EggStorageField::ArrivateIl => entry
            .arrivate_il
            .map(|d| CellValue::Text(d.format("%Y-%m-%d").to_string()))
            .unwrap_or_default(),
    }
}

const FIELDS: [EggStorageField; 6] = [
    EggStorageField::Prodotto,
    EggStorageField::Nome,
    EggStorageField::Origine,
    EggStorageField::Numero,
    EggStorageField::Eta,
    EggStorageField::ArrivateIl,
];

pub struct EggStorageService {
    api: ApiClient,
    grid: EditableGrid<(RowId, EggStorageField), CellValue, EggStorageSaver>,
    entries: Vec<EggStorageEntry>,
}

impl EggStorageService {
    pub fn new(api: ApiClient, timing: GridConfig) -> Self {
        let saver = EggStorageSaver { api: api.clone() };
        Self {
            api,
            grid: EditableGrid::new(saver, timing),
            entries: Vec::new(),
        }
    }

    pub fn grid(&self) -> &EditableGrid<(RowId, EggStorageField), CellValue, EggStorageSaver> {
        &self.grid
    }

    pub fn entries(&self) -> &[EggStorageEntry] {
        &self.entries
    }

    /// Refetch the batches, longest in storage first
    pub async fn refresh(&mut self, today: NaiveDate) {
        let mut entries = self.api.list_egg_storage().await.unwrap_or_else(|e| {
            tracing::warn!("Failed to load egg storage: {}", e);
            Vec::new()
        });
        sort_by_giacenza(&mut entries, today);
        self.grid.load(entries.iter().flat_map(|entry| {
            FIELDS
                .into_iter()
                .map(move |field| ((entry.id, field), storage_cell(entry, field)))
        }));
        self.entries = entries;
    }

    pub fn rows(&self, today: NaiveDate) -> Vec<StorageRow> {
        self.entries
            .iter()
            .map(|entry| StorageRow {
                giacenza: entry.giacenza(today),
                stale: entry.is_stale(today),
                entry: entry.clone(),
            })
            .collect()
    }

    pub fn totals(&self) -> BTreeMap<String, i64> {
        totals_by_product(&self.entries)
    }

    pub async fn create(&mut self, form: EggStorageCreate, today: NaiveDate) -> DashboardResult<()> {
        form.validate()?;
        self.api.create_egg_storage(&form).await?;
        tracing::info!("Stored {} eggs of {}", form.numero, form.nome);
        self.refresh(today).await;
        Ok(())
    }

    pub async fn delete(&mut self, id: RowId) -> DashboardResult<()> {
        self.api.delete_egg_storage(id).await?;
        self.entries.retain(|e| e.id != id);
        Ok(())
    }
}
