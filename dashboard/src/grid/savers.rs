//! One [`CellSaver`] per editable table

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Map, Value};
use shared::{
    BatchUpdate, BirthRateUpdate, ClientDataUpdate, CurveCellUpdate, CycleSettingsUpdate,
    EggStorageField, EggStorageUpdate, FlockField, HenGeneticsInput, Percent, Product,
    PurchaseBirthRateUpdate, RoosterGeneticsInput, RowId, TradeKind, TradingCellUpdate,
    TradingConfig, TradingDataUpdate, WeekLabel, WeeklyField,
};
use validator::Validate;

use super::{CellSaver, CellValue};
use crate::api::ApiClient;
use crate::error::{DashboardError, DashboardResult};
use crate::services::IncubationCache;

/// Single-property body, e.g. `{"Capi": 12000}`
fn field_body(wire_name: &str, value: &CellValue) -> Value {
    let mut body = Map::new();
    body.insert(wire_name.to_string(), value.to_json());
    Value::Object(body)
}

fn expect_integer(value: &CellValue) -> DashboardResult<i64> {
    value
        .as_integer()
        .ok_or_else(|| DashboardError::Validation("expected a whole number".to_string()))
}

fn expect_i32(value: &CellValue) -> DashboardResult<i32> {
    i32::try_from(expect_integer(value)?)
        .map_err(|_| DashboardError::Validation("number out of range".to_string()))
}

fn expect_text(value: &CellValue) -> DashboardResult<String> {
    match value {
        CellValue::Text(text) => Ok(text.clone()),
        CellValue::Empty => Ok(String::new()),
        _ => Err(DashboardError::Validation("expected text".to_string())),
    }
}

// ============================================================================
// Flocks
// ============================================================================

/// Flock grid: `(lotto id, column)`
pub struct FlockFieldSaver {
    pub api: ApiClient,
}

#[async_trait]
impl CellSaver<(RowId, FlockField), CellValue> for FlockFieldSaver {
    async fn save(&self, key: &(RowId, FlockField), value: &CellValue) -> DashboardResult<()> {
        let (id, field) = *key;
        match field {
            FlockField::StartWeek => {
                shared::validate_start_week(expect_i32(value)?)?;
            }
            FlockField::EndLabel => {
                shared::validate_end_label(value.as_text())?;
            }
            _ => {}
        }
        self.api.update_lotto(id, &field_body(field.wire_name(), value)).await
    }
}

/// Weekly cycle grid of one flock: `(row id, column)`
pub struct WeeklyDataSaver {
    pub api: ApiClient,
    pub lotto_id: RowId,
}

#[async_trait]
impl CellSaver<(RowId, WeeklyField), CellValue> for WeeklyDataSaver {
    async fn save(&self, key: &(RowId, WeeklyField), value: &CellValue) -> DashboardResult<()> {
        let (row_id, field) = *key;
        if matches!(field, WeeklyField::LightsOn | WeeklyField::LightsOff) {
            shared::validate_light_time(value.as_text().unwrap_or(""))?;
        }
        self.api
            .update_weekly_row(self.lotto_id, row_id, &field_body(field.wire_name(), value))
            .await
    }
}

// ============================================================================
// Birth rates
// ============================================================================

/// Birth-rate table: `(age in weeks, product)`
pub struct BirthRateSaver {
    pub api: ApiClient,
}

#[async_trait]
impl CellSaver<(i32, Product), Percent> for BirthRateSaver {
    async fn save(&self, key: &(i32, Product), value: &Percent) -> DashboardResult<()> {
        let (week, product) = *key;
        shared::validate_birth_rate_week(week)?;
        self.api
            .update_birth_rate(&BirthRateUpdate {
                week,
                product: product.key().to_string(),
                rate: *value,
            })
            .await
    }
}

/// Purchase birth-rate table: one cell per product
pub struct PurchaseBirthRateSaver {
    pub api: ApiClient,
}

#[async_trait]
impl CellSaver<Product, Percent> for PurchaseBirthRateSaver {
    async fn save(&self, key: &Product, value: &Percent) -> DashboardResult<()> {
        self.api
            .update_purchase_birth_rate(&PurchaseBirthRateUpdate {
                product: key.key().to_string(),
                rate: *value,
            })
            .await
    }
}

// ============================================================================
// Trading and planning
// ============================================================================

/// Trading grid: `(week, "Azienda_Prodotto" column)`
pub struct TradingCellSaver {
    pub api: ApiClient,
    pub kind: TradeKind,
    pub configs: Vec<TradingConfig>,
}

#[async_trait]
impl CellSaver<(WeekLabel, String), i64> for TradingCellSaver {
    async fn save(&self, key: &(WeekLabel, String), value: &i64) -> DashboardResult<()> {
        let (week, column) = key;
        let config = self
            .configs
            .iter()
            .find(|c| &c.column_name() == column)
            .ok_or_else(|| DashboardError::Validation(format!("unknown column {}", column)))?;
        shared::validate_quantity(*value)?;
        let update = TradingCellUpdate::new(config, *week, *value);
        self.api
            .update_trading_data(self.kind, &TradingDataUpdate::from(update))
            .await
    }
}

/// Client columns of a planning table: `(birth week, client id)`
pub struct PlanningClientSaver {
    pub api: ApiClient,
    pub product: Product,
}

#[async_trait]
impl CellSaver<(WeekLabel, RowId), i64> for PlanningClientSaver {
    async fn save(&self, key: &(WeekLabel, RowId), value: &i64) -> DashboardResult<()> {
        let (week, cliente_id) = *key;
        shared::validate_quantity(*value)?;
        self.api
            .update_client_data(
                self.product,
                &ClientDataUpdate {
                    anno: week.year,
                    settimana: week.week,
                    cliente_id,
                    quantita: *value,
                },
            )
            .await
    }
}

// ============================================================================
// Egg storage and incubation
// ============================================================================

/// Storage grid: `(batch id, column)`
pub struct EggStorageSaver {
    pub api: ApiClient,
}

#[async_trait]
impl CellSaver<(RowId, EggStorageField), CellValue> for EggStorageSaver {
    async fn save(&self, key: &(RowId, EggStorageField), value: &CellValue) -> DashboardResult<()> {
        let (id, field) = *key;
        let mut update = EggStorageUpdate::default();
        match field {
            EggStorageField::Prodotto => update.prodotto = Some(expect_text(value)?),
            EggStorageField::Nome => update.nome = Some(expect_text(value)?),
            EggStorageField::Origine => update.origine = Some(expect_text(value)?),
            EggStorageField::Numero => {
                let numero = expect_integer(value)?;
                shared::validate_quantity(numero)?;
                update.numero = Some(numero);
            }
            EggStorageField::Eta => update.eta = Some(expect_i32(value)?),
            EggStorageField::ArrivateIl => {
                let text = expect_text(value)?;
                let date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| {
                    DashboardError::Validation("arrival date must be YYYY-MM-DD".to_string())
                })?;
                update.arrivate_il = Some(date);
            }
        }
        self.api.update_egg_storage(id, &update).await
    }
}

/// Editable columns of an incubation batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchField {
    UovaUtilizzate,
    StoricoOverride,
}

/// Batch rows of the incubation register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchCell {
    pub incubation_id: RowId,
    pub batch_id: RowId,
    pub field: BatchField,
}

/// Refuses edits on committed incubations before any request is made
pub struct IncubationBatchSaver {
    pub api: ApiClient,
    pub cache: IncubationCache,
}

#[async_trait]
impl CellSaver<BatchCell, CellValue> for IncubationBatchSaver {
    async fn save(&self, key: &BatchCell, value: &CellValue) -> DashboardResult<()> {
        let incubation = self.cache.mutable(key.incubation_id)?;
        let mut update = BatchUpdate::default();
        match key.field {
            BatchField::UovaUtilizzate => {
                let used = expect_integer(value)?;
                let available = incubation
                    .batches
                    .iter()
                    .find(|b| b.id == key.batch_id)
                    .map(|b| b.uova_partita)
                    .ok_or_else(|| {
                        DashboardError::Validation(format!("unknown batch {}", key.batch_id))
                    })?;
                shared::validate_batch_usage(used, available)?;
                update.uova_utilizzate = Some(used);
            }
            BatchField::StoricoOverride => {
                update.storico_override = Some(value.as_percent().ok_or_else(|| {
                    DashboardError::Validation("expected a percentage".to_string())
                })?);
            }
        }
        let saved = self
            .api
            .update_batch(key.incubation_id, key.batch_id, &update)
            .await?;
        self.cache.replace_batch(key.incubation_id, saved);
        Ok(())
    }
}

// ============================================================================
// Settings, genetics, curves
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleSettingField {
    StartAge,
    EndAge,
}

pub struct CycleSettingsSaver {
    pub api: ApiClient,
}

#[async_trait]
impl CellSaver<CycleSettingField, i64> for CycleSettingsSaver {
    async fn save(&self, key: &CycleSettingField, value: &i64) -> DashboardResult<()> {
        let age = i32::try_from(*value)
            .map_err(|_| DashboardError::Validation("age out of range".to_string()))?;
        let update = match key {
            CycleSettingField::StartAge => CycleSettingsUpdate {
                eta_inizio_ciclo: Some(age),
                ..Default::default()
            },
            CycleSettingField::EndAge => CycleSettingsUpdate {
                eta_fine_ciclo: Some(age),
                ..Default::default()
            },
        };
        update.validate()?;
        self.api.update_cycle_settings(&update).await.map(|_| ())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneticsKind {
    Hen,
    Rooster,
}

/// Genetics name lists: `(kind, row id)`
pub struct GeneticsNameSaver {
    pub api: ApiClient,
}

#[async_trait]
impl CellSaver<(GeneticsKind, RowId), String> for GeneticsNameSaver {
    async fn save(&self, key: &(GeneticsKind, RowId), value: &String) -> DashboardResult<()> {
        let (kind, id) = *key;
        let name = value.trim().to_string();
        match kind {
            GeneticsKind::Hen => {
                let input = HenGeneticsInput {
                    genetica_gallina: name,
                };
                input.validate()?;
                self.api.update_hen_genetics(id, &input).await
            }
            GeneticsKind::Rooster => {
                let input = RoosterGeneticsInput { nome: name };
                input.validate()?;
                self.api.update_rooster_genetics(id, &input).await
            }
        }
    }
}

/// Production curve table: `(week, curve column)`
pub struct CurveCellSaver {
    pub api: ApiClient,
}

#[async_trait]
impl CellSaver<(i32, String), Percent> for CurveCellSaver {
    async fn save(&self, key: &(i32, String), value: &Percent) -> DashboardResult<()> {
        let (week, column) = key;
        self.api
            .update_curve_cell(&CurveCellUpdate::new(f64::from(*week), column, *value))
            .await
    }
}

/// Body that archives a flock without deleting it
pub fn archive_body() -> Value {
    field_body(FlockField::Active.wire_name(), &CellValue::Flag(false))
}
