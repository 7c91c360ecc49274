//! Wire models of the hatchery backend

mod birth_rate;
mod cycle;
mod egg_storage;
mod flock;
mod genetics;
mod incubation;
mod planning;
mod production_curve;
mod settings;
mod trading;

pub use birth_rate::*;
pub use cycle::*;
pub use egg_storage::*;
pub use flock::*;
pub use genetics::*;
pub use incubation::*;
pub use planning::*;
pub use production_curve::*;
pub use settings::*;
pub use trading::*;
