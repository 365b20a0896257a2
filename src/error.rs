use thiserror::Error;

use crate::models::OrganState;

#[derive(Debug, Error)]
pub enum DietError {
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required helper failed to apply: {helper}")]
    HelperFailed { helper: String },

    #[error("Failed to consume {quantity} x {item}")]
    ConsumptionFailure { item: String, quantity: u32 },

    #[error("Stalled with no organ progress; remaining: {}; organs: {organs}", format_remaining(.remaining))]
    StalledConsumption {
        remaining: Vec<(String, u32)>,
        organs: OrganState,
    },
}

fn format_remaining(remaining: &[(String, u32)]) -> String {
    remaining
        .iter()
        .map(|(item, qty)| format!("{} x {}", qty, item))
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, DietError>;
