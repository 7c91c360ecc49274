//! Page-level services
//!
//! Each service fetches what its page shows, keeps the last good copy, and
//! owns the editable grid of its table. Fetch failures are logged and leave
//! the page empty; mutation failures are returned to the caller.

pub mod birth_rates;
pub mod egg_storage;
pub mod flocks;
pub mod incubation;
pub mod planning;
pub mod settings;
pub mod trading;

pub use birth_rates::BirthRateService;
pub use egg_storage::{EggStorageService, StorageRow};
pub use flocks::{active_sorted, flock_cell, FlockOverview, FlockService};
pub use incubation::{IncubationCache, IncubationService};
pub use planning::PlanningService;
pub use settings::SettingsService;
pub use trading::TradingService;
