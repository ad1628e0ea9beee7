//! Data loading and assembly
//!
//! CSV ingestion into an in-memory match store, and conversion of the store
//! into feature rows.

pub mod dataset;
pub mod export;
pub mod store;

pub use dataset::{FeatureDataset, FeatureRow, FeatureValue};
pub use store::MatchStore;
