//! Reference statistics and the persistent settings that hold them.
//!
//! This module provides:
//! - The typed reference data model (rank → tier slot → augment table)
//! - The settings.json store shared by the control window and the overlay
//! - Fetching fresh statistics and the daily refresh policy

pub mod fetch;
pub mod model;
pub mod store;

pub use fetch::{needs_refresh, refresh_reference_data, MobalyticsSource};
pub use model::{AugmentStats, Rank, RankTables};
pub use store::SettingsStore;
