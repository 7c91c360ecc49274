//! Settings page: cycle ages, genetics lists, production curves

use shared::{
    hen_options, rooster_options, CycleSettings, HenGenetics, HenGeneticsInput, Percent,
    ProductionCurveTable, RoosterGenetics, RoosterGeneticsInput, RowId,
};
use validator::Validate;

use crate::api::ApiClient;
use crate::config::GridConfig;
use crate::error::DashboardResult;
use crate::grid::{
    CurveCellSaver, CycleSettingField, CycleSettingsSaver, EditableGrid, GeneticsKind,
    GeneticsNameSaver,
};

pub struct SettingsService {
    api: ApiClient,
    cycle: CycleSettings,
    hens: Vec<HenGenetics>,
    roosters: Vec<RoosterGenetics>,
    curves: ProductionCurveTable,
    cycle_grid: EditableGrid<CycleSettingField, i64, CycleSettingsSaver>,
    genetics_grid: EditableGrid<(GeneticsKind, RowId), String, GeneticsNameSaver>,
    curve_grid: EditableGrid<(i32, String), Percent, CurveCellSaver>,
}

impl SettingsService {
    pub fn new(api: ApiClient, timing: GridConfig) -> Self {
        Self {
            cycle_grid: EditableGrid::new(CycleSettingsSaver { api: api.clone() }, timing),
            genetics_grid: EditableGrid::new(GeneticsNameSaver { api: api.clone() }, timing),
            curve_grid: EditableGrid::new(CurveCellSaver { api: api.clone() }, timing),
            api,
            cycle: CycleSettings::default(),
            hens: Vec::new(),
            roosters: Vec::new(),
            curves: ProductionCurveTable::default(),
        }
    }

    pub fn cycle(&self) -> &CycleSettings {
        &self.cycle
    }

    pub fn curves(&self) -> &ProductionCurveTable {
        &self.curves
    }

    pub fn cycle_grid(&self) -> &EditableGrid<CycleSettingField, i64, CycleSettingsSaver> {
        &self.cycle_grid
    }

    pub fn genetics_grid(&self) -> &EditableGrid<(GeneticsKind, RowId), String, GeneticsNameSaver> {
        &self.genetics_grid
    }

    pub fn curve_grid(&self) -> &EditableGrid<(i32, String), Percent, CurveCellSaver> {
        &self.curve_grid
    }

    /// Select options for the hen and rooster columns of the flock grid
    pub fn genetics_options(&self) -> (Vec<String>, Vec<String>) {
        (hen_options(&self.hens), rooster_options(&self.roosters))
    }

    pub async fn refresh(&mut self) {
        self.cycle = self.api.cycle_settings().await.unwrap_or_else(|e| {
            tracing::warn!("Failed to load cycle settings: {}", e);
            CycleSettings::default()
        });
        self.hens = self.api.hen_genetics().await.unwrap_or_else(|e| {
            tracing::warn!("Failed to load hen genetics: {}", e);
            Vec::new()
        });
        self.roosters = self.api.rooster_genetics().await.unwrap_or_else(|e| {
            tracing::warn!("Failed to load rooster genetics: {}", e);
            Vec::new()
        });
        self.curves = self.api.production_curves().await.unwrap_or_else(|e| {
            tracing::warn!("Failed to load production curves: {}", e);
            ProductionCurveTable::default()
        });

        self.cycle_grid.load([
            (CycleSettingField::StartAge, i64::from(self.cycle.eta_inizio_ciclo)),
            (CycleSettingField::EndAge, i64::from(self.cycle.eta_fine_ciclo)),
        ]);

        let hens = self
            .hens
            .iter()
            .map(|h| ((GeneticsKind::Hen, h.id), h.genetica_gallina.clone()));
        let roosters = self
            .roosters
            .iter()
            .map(|r| ((GeneticsKind::Rooster, r.id), r.nome.clone()));
        self.genetics_grid.load(hens.chain(roosters));

        let mut cells = Vec::new();
        for row in &self.curves.data {
            let Some(week) = row.week() else {
                continue;
            };
            for curve in self.curves.curves() {
                if let Some(rate) = row.percent(curve) {
                    cells.push(((week as i32, curve.to_string()), rate));
                }
            }
        }
        self.curve_grid.load(cells);
    }

    pub async fn add_hen_genetics(&mut self, name: &str) -> DashboardResult<()> {
        let input = HenGeneticsInput {
            genetica_gallina: name.trim().to_string(),
        };
        input.validate()?;
        self.api.create_hen_genetics(&input).await?;
        self.refresh().await;
        Ok(())
    }

    pub async fn add_rooster_genetics(&mut self, name: &str) -> DashboardResult<()> {
        let input = RoosterGeneticsInput {
            nome: name.trim().to_string(),
        };
        input.validate()?;
        self.api.create_rooster_genetics(&input).await?;
        self.refresh().await;
        Ok(())
    }

    pub async fn delete_genetics(&mut self, kind: GeneticsKind, id: RowId) -> DashboardResult<()> {
        match kind {
            GeneticsKind::Hen => {
                self.api.delete_hen_genetics(id).await?;
                self.hens.retain(|h| h.id != id);
            }
            GeneticsKind::Rooster => {
                self.api.delete_rooster_genetics(id).await?;
                self.roosters.retain(|r| r.id != id);
            }
        }
        Ok(())
    }

    /// Week numbers present in the curve table
    pub fn curve_weeks(&self) -> Vec<i32> {
        self.curves
            .data
            .iter()
            .filter_map(|row| row.week())
            .map(|w| w as i32)
            .collect()
    }
}
