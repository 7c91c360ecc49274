//! Hatch-rate tables: by hen age and product, and for purchased eggs

use shared::{BirthRateMatrix, Percent, Product, PurchaseBirthRates, BIRTH_RATE_WEEKS};

use crate::api::ApiClient;
use crate::config::GridConfig;
use crate::grid::{BirthRateSaver, EditableGrid, PurchaseBirthRateSaver};

pub struct BirthRateService {
    api: ApiClient,
    matrix: BirthRateMatrix,
    purchase: PurchaseBirthRates,
    grid: EditableGrid<(i32, Product), Percent, BirthRateSaver>,
    purchase_grid: EditableGrid<Product, Percent, PurchaseBirthRateSaver>,
}

impl BirthRateService {
    pub fn new(api: ApiClient, timing: GridConfig) -> Self {
        Self {
            grid: EditableGrid::new(BirthRateSaver { api: api.clone() }, timing),
            purchase_grid: EditableGrid::new(PurchaseBirthRateSaver { api: api.clone() }, timing),
            api,
            matrix: BirthRateMatrix::default(),
            purchase: PurchaseBirthRates::default(),
        }
    }

    pub fn matrix(&self) -> &BirthRateMatrix {
        &self.matrix
    }

    pub fn purchase(&self) -> &PurchaseBirthRates {
        &self.purchase
    }

    pub fn grid(&self) -> &EditableGrid<(i32, Product), Percent, BirthRateSaver> {
        &self.grid
    }

    pub fn purchase_grid(&self) -> &EditableGrid<Product, Percent, PurchaseBirthRateSaver> {
        &self.purchase_grid
    }

    /// Refetch both tables; every cell shows a rate, falling back to the
    /// defaults where the backend has none
    pub async fn refresh(&mut self) {
        self.matrix = self.api.birth_rates().await.unwrap_or_else(|e| {
            tracing::warn!("Failed to load birth rates: {}", e);
            BirthRateMatrix::default()
        });
        self.purchase = self.api.purchase_birth_rates().await.unwrap_or_else(|e| {
            tracing::warn!("Failed to load purchase birth rates: {}", e);
            PurchaseBirthRates::default()
        });

        let matrix = &self.matrix;
        self.grid.load(BIRTH_RATE_WEEKS.flat_map(|week| {
            Product::ALL
                .into_iter()
                .map(move |product| ((week, product), matrix.rate(week, product)))
        }));
        self.purchase_grid.load(
            Product::ALL
                .into_iter()
                .map(|product| (product, self.purchase.rate(product))),
        );
    }
}
