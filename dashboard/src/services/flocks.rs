//! Flock register ("Allevamenti") and the weekly cycle sheet

use chrono::NaiveDate;
use shared::{
    next_cycle_age, CycleSettings, FarmStructure, FlockField, FlockStatus, Lotto, LottoCreate,
    RowId, WeekLabel, WeeklyData, WeeklyDataCreate, WeeklyDataSheet, WeeklyField,
};
use validator::Validate;

use crate::api::ApiClient;
use crate::config::{Config, GridConfig};
use crate::error::{DashboardError, DashboardResult};
use crate::grid::{
    archive_body, CellValue, CommitOutcome, EditableGrid, FlockFieldSaver, WeeklyDataSaver,
};

/// One line of the flock register
#[derive(Debug, Clone, PartialEq)]
pub struct FlockOverview {
    pub id: RowId,
    pub code: String,
    pub farm: String,
    pub shed: String,
    pub breed: String,
    pub product: String,
    pub head_count: i64,
    pub birth: WeekLabel,
    pub age: i32,
    pub status: FlockStatus,
    pub cycle_start: WeekLabel,
    pub cycle_end: WeekLabel,
    pub cycle_end_age: i32,
}

impl FlockOverview {
    pub fn new(lotto: &Lotto, today: NaiveDate, settings: &CycleSettings) -> Self {
        Self {
            id: lotto.id,
            code: lotto.user_code(),
            farm: lotto.farm.clone(),
            shed: lotto.shed.clone(),
            breed: lotto.breed.clone(),
            product: lotto.product.clone(),
            head_count: lotto.head_count,
            birth: lotto.birth_label(),
            age: lotto.age_weeks(today),
            status: lotto.status(today, settings.eta_inizio_ciclo),
            cycle_start: lotto.cycle_start(settings.eta_inizio_ciclo),
            cycle_end: lotto.cycle_end(settings.eta_fine_ciclo),
            cycle_end_age: lotto.cycle_end_age(settings.eta_fine_ciclo),
        }
    }
}

/// Active flocks, newest start week first
pub fn active_sorted(mut lotti: Vec<Lotto>) -> Vec<Lotto> {
    lotti.retain(|l| l.active);
    lotti.sort_by(|a, b| (b.start_year, b.start_week).cmp(&(a.start_year, a.start_week)));
    lotti
}

/// Display value of a flock cell
pub fn flock_cell(lotto: &Lotto, field: FlockField) -> CellValue {
    let text = |value: &str| {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    };
    match field {
        FlockField::Farm => text(&lotto.farm),
        FlockField::Shed => text(&lotto.shed),
        FlockField::Breed => text(&lotto.breed),
        FlockField::RoosterBreed => text(lotto.rooster_breed.as_deref().unwrap_or("")),
        FlockField::Product => text(&lotto.product),
        FlockField::HeadCount => CellValue::Integer(lotto.head_count),
        FlockField::StartYear => CellValue::Integer(i64::from(lotto.start_year)),
        FlockField::StartWeek => CellValue::Integer(i64::from(lotto.start_week)),
        FlockField::EndLabel => text(lotto.end_label.as_deref().unwrap_or("")),
        FlockField::ProductionCurve => text(lotto.production_curve.as_deref().unwrap_or("")),
        FlockField::Active => CellValue::Flag(lotto.active),
    }
}

const GRID_FIELDS: [FlockField; 11] = [
    FlockField::Farm,
    FlockField::Shed,
    FlockField::Breed,
    FlockField::RoosterBreed,
    FlockField::Product,
    FlockField::HeadCount,
    FlockField::StartYear,
    FlockField::StartWeek,
    FlockField::EndLabel,
    FlockField::ProductionCurve,
    FlockField::Active,
];

fn weekly_cell(row: &WeeklyData, field: WeeklyField) -> CellValue {
    match field {
        WeeklyField::DeadHens => CellValue::Integer(row.galline_morte),
        WeeklyField::DeadRoosters => CellValue::Integer(row.galli_morti),
        WeeklyField::HatchableEggs => CellValue::Integer(row.uova_incubabili),
        WeeklyField::SecondGradeEggs => CellValue::Integer(row.uova_seconda),
        WeeklyField::FeedType => CellValue::Text(row.tipo_mangime.clone()),
        WeeklyField::LightsOn => CellValue::Text(row.accensione_luce.clone()),
        WeeklyField::LightsOff => CellValue::Text(row.spegnimento_luce.clone()),
    }
}

const WEEKLY_FIELDS: [WeeklyField; 7] = [
    WeeklyField::DeadHens,
    WeeklyField::DeadRoosters,
    WeeklyField::HatchableEggs,
    WeeklyField::SecondGradeEggs,
    WeeklyField::FeedType,
    WeeklyField::LightsOn,
    WeeklyField::LightsOff,
];

/// Flock register page
pub struct FlockService {
    api: ApiClient,
    timing: GridConfig,
    grid: EditableGrid<(RowId, FlockField), CellValue, FlockFieldSaver>,
    lotti: Vec<Lotto>,
    settings: CycleSettings,
}

impl FlockService {
    pub fn new(api: ApiClient, config: &Config) -> Self {
        let saver = FlockFieldSaver { api: api.clone() };
        Self {
            api,
            timing: config.grid,
            grid: EditableGrid::new(saver, config.grid),
            lotti: Vec::new(),
            settings: CycleSettings {
                eta_inizio_ciclo: config.cycle.producing_from_week,
                ..CycleSettings::default()
            },
        }
    }

    pub fn grid(&self) -> &EditableGrid<(RowId, FlockField), CellValue, FlockFieldSaver> {
        &self.grid
    }

    /// Active flocks as last fetched
    pub fn lotti(&self) -> &[Lotto] {
        &self.lotti
    }

    pub fn settings(&self) -> &CycleSettings {
        &self.settings
    }

    /// Refetch flocks and cycle settings. A failed fetch is logged and the
    /// page keeps rendering with what it has.
    pub async fn refresh(&mut self) {
        match self.api.cycle_settings().await {
            Ok(settings) => self.settings = settings,
            Err(e) => tracing::warn!("Failed to load cycle settings: {}", e),
        }
        self.lotti = match self.api.list_lotti().await {
            Ok(lotti) => active_sorted(lotti),
            Err(e) => {
                tracing::warn!("Failed to load flocks: {}", e);
                Vec::new()
            }
        };
        self.grid.load(self.lotti.iter().flat_map(|lotto| {
            GRID_FIELDS
                .into_iter()
                .map(move |field| ((lotto.id, field), flock_cell(lotto, field)))
        }));
    }

    pub fn overview(&self, today: NaiveDate) -> Vec<FlockOverview> {
        self.lotti
            .iter()
            .map(|lotto| FlockOverview::new(lotto, today, &self.settings))
            .collect()
    }

    pub async fn farm_structure(&self) -> FarmStructure {
        self.api.farm_structure().await.unwrap_or_else(|e| {
            tracing::warn!("Failed to load farm structure: {}", e);
            FarmStructure::new()
        })
    }

    pub async fn create(&mut self, form: LottoCreate) -> DashboardResult<()> {
        form.validate()?;
        shared::validate_end_label(form.end_label.as_deref())?;
        self.api.create_lotto(&form).await?;
        tracing::info!("Housed new flock at {} shed {}", form.farm, form.shed);
        self.refresh().await;
        Ok(())
    }

    /// Hide a flock from the register, keeping its history
    pub async fn archive(&mut self, id: RowId) -> DashboardResult<()> {
        self.api.update_lotto(id, &archive_body()).await?;
        self.lotti.retain(|l| l.id != id);
        Ok(())
    }

    /// Remove a flock and its weekly data
    pub async fn delete(&mut self, id: RowId) -> DashboardResult<()> {
        self.api.delete_lotto(id).await?;
        self.lotti.retain(|l| l.id != id);
        Ok(())
    }

    /// Move the end of cycle by `weeks` and save it; returns the new label
    pub async fn shift_end(&mut self, id: RowId, weeks: i32) -> DashboardResult<String> {
        let lotto = self
            .lotti
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| DashboardError::Validation(format!("unknown flock {}", id)))?;
        let label = lotto
            .cycle_end(self.settings.eta_fine_ciclo)
            .add_weeks(weeks)
            .to_string();
        let outcome = self
            .grid
            .commit_with((id, FlockField::EndLabel), CellValue::Text(label.clone()))
            .await;
        if let CommitOutcome::Failed(e) = outcome {
            return Err(e);
        }
        if let Some(lotto) = self.lotti.iter_mut().find(|l| l.id == id) {
            lotto.end_label = Some(label.clone());
        }
        Ok(label)
    }

    /// Look a flock up by cycle code; `None` when the backend has no match
    pub async fn search(&self, code: &str) -> DashboardResult<Option<Lotto>> {
        if shared::id_from_code(code).is_none() {
            return Ok(None);
        }
        match self.api.search_lotto(code).await {
            Ok(result) if result.found => Ok(Some(result.lotto)),
            Ok(_) => Ok(None),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Weekly cycle sheet of a flock, with a grid bound to its rows
    pub async fn weekly_sheet(
        &self,
        lotto_id: RowId,
    ) -> (
        WeeklyDataSheet,
        EditableGrid<(RowId, WeeklyField), CellValue, WeeklyDataSaver>,
    ) {
        let sheet = self.api.weekly_data(lotto_id).await.unwrap_or_else(|e| {
            tracing::warn!("Failed to load weekly data of flock {}: {}", lotto_id, e);
            WeeklyDataSheet {
                lotto_id,
                anno_start: None,
                sett_start: None,
                data: Vec::new(),
            }
        });
        let grid = EditableGrid::new(
            WeeklyDataSaver {
                api: self.api.clone(),
                lotto_id,
            },
            self.timing,
        );
        grid.load(sheet.data.iter().flat_map(|row| {
            WEEKLY_FIELDS
                .into_iter()
                .map(move |field| ((row.id, field), weekly_cell(row, field)))
        }));
        (sheet, grid)
    }

    /// Append the next week of age to a cycle sheet
    pub async fn add_weekly_row(&self, sheet: &mut WeeklyDataSheet) -> DashboardResult<WeeklyData> {
        let row = WeeklyDataCreate {
            eta_animali: next_cycle_age(&sheet.data),
            ..WeeklyDataCreate::default()
        };
        let saved = self.api.add_weekly_row(sheet.lotto_id, &row).await?;
        sheet.data.push(saved.clone());
        Ok(saved)
    }

    pub async fn delete_weekly_row(
        &self,
        sheet: &mut WeeklyDataSheet,
        row_id: RowId,
    ) -> DashboardResult<()> {
        self.api.delete_weekly_row(sheet.lotto_id, row_id).await?;
        sheet.data.retain(|r| r.id != row_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lotto(id: RowId, year: i32, week: i32, active: bool) -> Lotto {
        Lotto {
            id,
            farm: "Tonini".to_string(),
            shed: "1".to_string(),
            breed: "JA87".to_string(),
            rooster_breed: None,
            product: "Granpollo".to_string(),
            head_count: 10_000,
            start_year: year,
            start_week: week,
            end_label: None,
            production_curve: None,
            active,
        }
    }

    #[test]
    fn test_active_sorted_newest_first() {
        let sorted = active_sorted(vec![
            lotto(1, 2024, 40, true),
            lotto(2, 2025, 3, true),
            lotto(3, 2025, 10, false),
            lotto(4, 2025, 1, true),
        ]);
        let ids: Vec<_> = sorted.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![2, 4, 1]);
    }

    #[test]
    fn test_overview_labels() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
        let row = FlockOverview::new(&lotto(7, 2025, 1, true), today, &CycleSettings::default());
        assert_eq!(row.code, "7TON2025JA87");
        assert_eq!(row.age, 24);
        assert_eq!(row.status, FlockStatus::Producing);
        assert_eq!(row.cycle_start.to_string(), "2025/25");
        assert_eq!(row.cycle_end.to_string(), "2026/13");
    }

    #[test]
    fn test_flock_cells() {
        let l = lotto(1, 2025, 5, true);
        assert_eq!(flock_cell(&l, FlockField::HeadCount), CellValue::Integer(10_000));
        assert_eq!(flock_cell(&l, FlockField::EndLabel), CellValue::Empty);
        assert_eq!(flock_cell(&l, FlockField::Active), CellValue::Flag(true));
    }
}
