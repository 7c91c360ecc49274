//! Incubation register: runs, their batches, and the commit lock

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use shared::{
    BatchCreate, BirthRateMatrix, EggStorageEntry, Incubation, IncubationBatch, IncubationCreate,
    IncubationUpdate, RowId,
};

use crate::api::ApiClient;
use crate::config::GridConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::grid::{BatchCell, BatchField, CellValue, EditableGrid, IncubationBatchSaver};

/// Last fetched incubations, shared by the service and the batch grid
#[derive(Clone, Default)]
pub struct IncubationCache {
    inner: Arc<RwLock<Vec<Incubation>>>,
}

impl IncubationCache {
    fn read(&self) -> RwLockReadGuard<'_, Vec<Incubation>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Incubation>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn replace(&self, incubations: Vec<Incubation>) {
        *self.write() = incubations;
    }

    pub fn snapshot(&self) -> Vec<Incubation> {
        self.read().clone()
    }

    pub fn find(&self, id: RowId) -> Option<Incubation> {
        self.read().iter().find(|i| i.id == id).cloned()
    }

    /// The incubation, provided it can still be changed
    pub fn mutable(&self, id: RowId) -> DashboardResult<Incubation> {
        let incubation = self
            .find(id)
            .ok_or_else(|| DashboardError::Validation(format!("unknown incubation {}", id)))?;
        if incubation.committed {
            return Err(DashboardError::ReadOnly(format!("Incubation {}", id)));
        }
        Ok(incubation)
    }

    /// Insert or replace a run, keeping the batches already known when the
    /// backend omits them
    pub fn upsert(&self, mut incubation: Incubation) {
        let mut incubations = self.write();
        match incubations.iter_mut().find(|i| i.id == incubation.id) {
            Some(existing) => {
                if incubation.batches.is_empty() {
                    incubation.batches = std::mem::take(&mut existing.batches);
                }
                *existing = incubation;
            }
            None => incubations.push(incubation),
        }
    }

    pub fn replace_batch(&self, incubation_id: RowId, batch: IncubationBatch) {
        let mut incubations = self.write();
        let Some(incubation) = incubations.iter_mut().find(|i| i.id == incubation_id) else {
            return;
        };
        match incubation.batches.iter_mut().find(|b| b.id == batch.id) {
            Some(existing) => *existing = batch,
            None => incubation.batches.push(batch),
        }
    }

    fn remove_batch(&self, incubation_id: RowId, batch_id: RowId) {
        if let Some(incubation) = self.write().iter_mut().find(|i| i.id == incubation_id) {
            incubation.batches.retain(|b| b.id != batch_id);
        }
    }

    fn remove(&self, id: RowId) {
        self.write().retain(|i| i.id != id);
    }

    fn mark_committed(&self, id: RowId) {
        if let Some(incubation) = self.write().iter_mut().find(|i| i.id == id) {
            incubation.committed = true;
        }
    }
}

fn batch_cells(incubations: &[Incubation]) -> Vec<(BatchCell, CellValue)> {
    let mut cells = Vec::new();
    for incubation in incubations {
        for batch in &incubation.batches {
            let cell = |field| BatchCell {
                incubation_id: incubation.id,
                batch_id: batch.id,
                field,
            };
            cells.push((
                cell(BatchField::UovaUtilizzate),
                CellValue::Integer(batch.uova_utilizzate),
            ));
            cells.push((
                cell(BatchField::StoricoOverride),
                batch
                    .storico_override
                    .map(CellValue::Percent)
                    .unwrap_or_default(),
            ));
        }
    }
    cells
}

/// Incubation page
pub struct IncubationService {
    api: ApiClient,
    cache: IncubationCache,
    grid: EditableGrid<BatchCell, CellValue, IncubationBatchSaver>,
    rates: BirthRateMatrix,
}

impl IncubationService {
    pub fn new(api: ApiClient, timing: GridConfig) -> Self {
        let cache = IncubationCache::default();
        let saver = IncubationBatchSaver {
            api: api.clone(),
            cache: cache.clone(),
        };
        Self {
            api,
            cache,
            grid: EditableGrid::new(saver, timing),
            rates: BirthRateMatrix::default(),
        }
    }

    pub fn grid(&self) -> &EditableGrid<BatchCell, CellValue, IncubationBatchSaver> {
        &self.grid
    }

    pub fn incubations(&self) -> Vec<Incubation> {
        self.cache.snapshot()
    }

    /// Refetch runs and hatch rates; failures leave the page empty
    pub async fn refresh(&mut self) {
        let incubations = match self.api.list_incubations().await {
            Ok(incubations) => incubations,
            Err(e) => {
                tracing::warn!("Failed to load incubations: {}", e);
                Vec::new()
            }
        };
        self.rates = match self.api.birth_rates().await {
            Ok(rates) => rates,
            Err(e) => {
                tracing::warn!("Failed to load birth rates: {}", e);
                BirthRateMatrix::default()
            }
        };
        self.grid.load(batch_cells(&incubations));
        self.cache.replace(incubations);
    }

    pub async fn create(&mut self, data: IncubationCreate) -> DashboardResult<()> {
        if data.data_incubazione.is_none() {
            return Err("Incubation date is required".into());
        }
        self.api.create_incubation(&data).await?;
        tracing::info!("Created incubation for {:?}", data.data_incubazione);
        self.refresh().await;
        Ok(())
    }

    pub async fn update(&self, id: RowId, update: IncubationUpdate) -> DashboardResult<Incubation> {
        self.cache.mutable(id)?;
        let saved = self.api.update_incubation(id, &update).await?;
        self.cache.upsert(saved.clone());
        Ok(saved)
    }

    pub async fn delete(&self, id: RowId) -> DashboardResult<()> {
        self.cache.mutable(id)?;
        self.api.delete_incubation(id).await?;
        self.cache.remove(id);
        Ok(())
    }

    /// Allocate a storage batch to a run, initially with no eggs used
    pub async fn add_batch(
        &self,
        incubation_id: RowId,
        entry: &EggStorageEntry,
    ) -> DashboardResult<IncubationBatch> {
        self.cache.mutable(incubation_id)?;
        let batch = BatchCreate {
            egg_storage_id: entry.id,
            prodotto: entry.prodotto.clone(),
            nome: entry.nome.clone(),
            origine: entry.origine.clone(),
            uova_partita: entry.display_quantity(),
            eta: entry.eta,
        };
        let saved = self.api.add_batch(incubation_id, &batch).await?;
        self.cache.replace_batch(incubation_id, saved.clone());
        self.grid.load(batch_cells(&self.cache.snapshot()));
        Ok(saved)
    }

    pub async fn remove_batch(&self, incubation_id: RowId, batch_id: RowId) -> DashboardResult<()> {
        self.cache.mutable(incubation_id)?;
        self.api.remove_batch(incubation_id, batch_id).await?;
        self.cache.remove_batch(incubation_id, batch_id);
        self.grid.load(batch_cells(&self.cache.snapshot()));
        Ok(())
    }

    /// Deduct the used eggs from storage; the run becomes read-only
    pub async fn commit(&self, id: RowId) -> DashboardResult<()> {
        self.cache.mutable(id)?;
        self.api.commit_incubation(id).await?;
        self.cache.mark_committed(id);
        tracing::info!("Committed incubation {}", id);
        Ok(())
    }

    /// Forecast chicks of a run at the current hatch rates
    pub fn forecast_chicks(&self, id: RowId) -> Option<i64> {
        self.cache
            .find(id)
            .map(|incubation| incubation.forecast_chicks(&self.rates))
    }

    pub fn set_rates(&mut self, rates: BirthRateMatrix) {
        self.rates = rates;
    }
}
