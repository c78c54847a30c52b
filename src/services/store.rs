// SPDX-License-Identifier: GPL-3.0-or-later
// src/services/store.rs
//
// JSON persistence for records, stats, and imported photos.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use uuid::Uuid;

use crate::constant::{DATA_DIR, PHOTOS_DIR, RECORDS_FILE, STATS_FILE};
use crate::domain::record::MistakeRecord;
use crate::domain::stats::UserStats;

/// Record and stats storage rooted at a data directory.
///
/// Layout: `records.json` (all records), `stats.json`, and `images/`
/// holding app-owned copies of imported photos. Every operation is a
/// plain read-modify-write of the whole file; the data set is a personal
/// notebook, not a database.
#[derive(Debug, Clone)]
pub struct RecordStore {
    root: PathBuf,
}

impl RecordStore {
    /// Open (and create if needed) the store at the platform data dir,
    /// or at an explicit override from the command line.
    pub fn open(override_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let root = match override_dir {
            Some(dir) => dir,
            None => dirs::data_dir()
                .context("No data directory available")?
                .join(DATA_DIR),
        };
        fs::create_dir_all(root.join(PHOTOS_DIR))
            .with_context(|| format!("Failed to create data directory {}", root.display()))?;
        Ok(Self { root })
    }

    /// Store rooted at an explicit directory, used as a last-resort
    /// fallback. Layout creation failures surface on the first write.
    pub fn at(root: PathBuf) -> Self {
        if let Err(e) = fs::create_dir_all(root.join(PHOTOS_DIR)) {
            log::warn!("Could not prepare data directory {}: {e}", root.display());
        }
        Self { root }
    }

    /// Absolute path of a record's photo.
    pub fn photo_path(&self, record: &MistakeRecord) -> PathBuf {
        self.root.join(&record.photo_path)
    }

    /// Copy an imported photo into the store. Returns the store-relative
    /// path recorded on the mistake.
    pub fn import_photo(&self, source: &Path) -> anyhow::Result<PathBuf> {
        let ext = source
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("jpg");
        let relative = PathBuf::from(PHOTOS_DIR).join(format!("{}.{ext}", Uuid::new_v4()));
        fs::copy(source, self.root.join(&relative))
            .with_context(|| format!("Failed to import photo {}", source.display()))?;
        Ok(relative)
    }

    /// Load all records, newest first.
    pub fn load_records(&self) -> anyhow::Result<Vec<MistakeRecord>> {
        let path = self.root.join(RECORDS_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut records: Vec<MistakeRecord> =
            serde_json::from_str(&data).context("Records file is not valid JSON")?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    fn save_records(&self, records: &[MistakeRecord]) -> anyhow::Result<()> {
        let path = self.root.join(RECORDS_FILE);
        let data = serde_json::to_string_pretty(records)?;
        fs::write(&path, data).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Insert or replace records by id. Existing order is preserved;
    /// new records go to the front.
    pub fn upsert_records(&self, changed: &[MistakeRecord]) -> anyhow::Result<()> {
        let mut records = self.load_records()?;
        for record in changed {
            match records.iter_mut().find(|r| r.id == record.id) {
                Some(slot) => *slot = record.clone(),
                None => records.insert(0, record.clone()),
            }
        }
        self.save_records(&records)
    }

    /// Delete one record and its photo. The photo is removed best-effort;
    /// a missing file only logs.
    pub fn delete_record(&self, id: Uuid) -> anyhow::Result<()> {
        let mut records = self.load_records()?;
        let Some(index) = records.iter().position(|r| r.id == id) else {
            return Ok(());
        };
        let removed = records.remove(index);
        self.save_records(&records)?;

        let photo = self.root.join(&removed.photo_path);
        if let Err(e) = fs::remove_file(&photo) {
            log::warn!("Could not remove photo {}: {e}", photo.display());
        }
        Ok(())
    }

    pub fn load_stats(&self) -> anyhow::Result<UserStats> {
        let path = self.root.join(STATS_FILE);
        if !path.exists() {
            return Ok(UserStats::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&data).context("Stats file is not valid JSON")
    }

    pub fn save_stats(&self, stats: &UserStats) -> anyhow::Result<()> {
        let path = self.root.join(STATS_FILE);
        let data = serde_json::to_string_pretty(stats)?;
        fs::write(&path, data).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::Subject;

    fn open_temp() -> (tempfile::TempDir, RecordStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(Some(dir.path().join("data"))).unwrap();
        (dir, store)
    }

    #[test]
    fn empty_store_loads_defaults() {
        let (_dir, store) = open_temp();
        assert!(store.load_records().unwrap().is_empty());
        assert_eq!(store.load_stats().unwrap(), UserStats::default());
    }

    #[test]
    fn upsert_then_reload() {
        let (_dir, store) = open_temp();
        let a = MistakeRecord::new(Subject::Math, PathBuf::from("images/a.jpg"), None);
        let b = MistakeRecord::new(Subject::English, PathBuf::from("images/b.jpg"), None);
        store.upsert_records(&[a.clone(), b.clone()]).unwrap();

        let loaded = store.load_records().unwrap();
        assert_eq!(loaded.len(), 2);

        // Replacing by id does not duplicate.
        let mut a2 = a.clone();
        a2.reviewed = true;
        store.upsert_records(&[a2]).unwrap();
        let loaded = store.load_records().unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.iter().find(|r| r.id == a.id).unwrap().reviewed);
    }

    #[test]
    fn delete_removes_record() {
        let (_dir, store) = open_temp();
        let a = MistakeRecord::new(Subject::Math, PathBuf::from("images/a.jpg"), None);
        store.upsert_records(std::slice::from_ref(&a)).unwrap();
        store.delete_record(a.id).unwrap();
        assert!(store.load_records().unwrap().is_empty());

        // Deleting again is a no-op.
        store.delete_record(a.id).unwrap();
    }

    #[test]
    fn stats_round_trip() {
        let (_dir, store) = open_temp();
        let mut stats = UserStats::default();
        stats.add_xp(130);
        stats.streak = 4;
        store.save_stats(&stats).unwrap();
        assert_eq!(store.load_stats().unwrap(), stats);
    }
}
