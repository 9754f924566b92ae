pub mod reports;
pub mod simulation;

pub use simulation::{SeedResult, SessionRecord, SimulationConfig, run_seed};
