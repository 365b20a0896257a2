pub mod persistence;

pub use persistence::{load_catalog, load_state, save_state};
