//! `cotejo-recon` — two-source record reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded records, returns a per-field match
//! verdict for every key present in either source. No CLI dependencies; the
//! only IO concern is projecting CSV text onto canonical records.

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod matcher;
pub mod model;
pub mod names;
pub mod normalize;
pub mod similarity;

pub use config::ReconConfig;
pub use engine::run;
pub use error::ReconError;
pub use model::{ComparisonRow, ReconInput, ReconResult, Record};
