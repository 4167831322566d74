//! Persistent session settings: active rank, last fetch date and the
//! reference statistics, stored as settings.json.
//!
//! The control window writes here and the overlay worker reads here; the
//! file is the only thing the two share.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::model::{Rank, ReferenceData, ReferenceTable, TierSlot};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Rank whose statistics are shown
    #[serde(default)]
    pub rank: Rank,
    /// Day the reference statistics were last fetched
    #[serde(default)]
    pub fetch_last_update: Option<NaiveDate>,
    /// Reference statistics per rank and tier slot
    #[serde(default)]
    pub augments: ReferenceData,
}

/// Loads and saves [`Settings`] at a fixed path.
#[derive(Clone, Debug)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the settings file, creating it with defaults if missing.
    pub fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            let settings = Settings::default();
            self.save(&settings)?;
            crate::log(&format!(
                "Created default settings at {}",
                self.path.display()
            ));
            return Ok(settings);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    /// Writes the settings atomically (temp file in the same directory,
    /// then rename), so a reader never sees a half-written file.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(settings)?;
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(json.as_bytes())?;
        temp.flush()?;
        temp.persist(&self.path)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }

    /// Loads, applies `edit`, saves. Returns the saved settings.
    pub fn update(&self, edit: impl FnOnce(&mut Settings)) -> Result<Settings> {
        let mut settings = self.load()?;
        edit(&mut settings);
        self.save(&settings)?;
        Ok(settings)
    }

    pub fn set_rank(&self, rank: Rank) -> Result<()> {
        self.update(|s| s.rank = rank)?;
        crate::log(&format!("Rank set to {}", rank));
        Ok(())
    }

    pub fn set_table(&self, rank: Rank, slot: TierSlot, table: ReferenceTable) -> Result<()> {
        self.update(|s| s.augments.set_table(rank, slot, table))?;
        Ok(())
    }

    pub fn mark_fetched(&self, day: NaiveDate) -> Result<()> {
        self.update(|s| s.fetch_last_update = Some(day))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::AugmentStats;

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));

        let settings = store.load().unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.rank, Rank::Gold);
        assert!(store.path().exists());
    }

    #[test]
    fn test_set_rank_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));

        store.set_rank(Rank::Master).unwrap();

        let reopened = SettingsStore::new(dir.path().join("settings.json"));
        assert_eq!(reopened.load().unwrap().rank, Rank::Master);
    }

    #[test]
    fn test_set_table_and_mark_fetched() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        let table: ReferenceTable = [(
            "Tiny Titans",
            AugmentStats { pick_rate: 5.0, avg_place: 4.2, win_rate: 11.0 },
        )]
        .into_iter()
        .collect();
        let day = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();

        store.set_table(Rank::Gold, TierSlot::Three, table.clone()).unwrap();
        store.mark_fetched(day).unwrap();

        let settings = store.load().unwrap();
        assert_eq!(settings.fetch_last_update, Some(day));
        let tables = settings.augments.tables(Rank::Gold).unwrap();
        assert_eq!(tables.slot(TierSlot::Three), &table);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "rank": "silver" }"#).unwrap();

        let settings = SettingsStore::new(&path).load().unwrap();
        assert_eq!(settings.rank, Rank::Silver);
        assert!(settings.fetch_last_update.is_none());
        assert!(settings.augments.is_empty());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(SettingsStore::new(&path).load().is_err());
    }
}
