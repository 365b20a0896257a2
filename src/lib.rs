pub mod cli;
pub mod env;
pub mod error;
pub mod executor;
pub mod interface;
pub mod models;
pub mod planner;
pub mod state;

pub use error::{DietError, Result};
pub use models::{CatalogEntry, DietEntry, DietPlan, Item, Organ, OrganState};
