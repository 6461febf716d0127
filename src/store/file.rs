//! JSON file backed repository with atomic writes

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{FinanceRepository, FinanceState};
use crate::error::FinanceResult;

/// Repository persisted to a single JSON file.
///
/// The file is rewritten after every successful mutation; the in-memory
/// state only changes once the write succeeded.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    state: FinanceState,
}

impl JsonFileStore {
    /// Open the state file, starting from defaults if it does not exist yet
    pub fn open<P: AsRef<Path>>(path: P) -> FinanceResult<Self> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            serde_json::from_reader(reader)?
        } else {
            log::info!("no state file at {}, starting from defaults", path.display());
            FinanceState::default()
        };
        Ok(Self { path, state })
    }

    /// Wrap an explicit state without reading the file
    pub fn with_state<P: AsRef<Path>>(path: P, state: FinanceState) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            state,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current state to disk
    pub fn save(&self) -> FinanceResult<()> {
        write_json_atomic(&self.path, &self.state)
    }
}

impl FinanceRepository for JsonFileStore {
    fn state(&self) -> &FinanceState {
        &self.state
    }

    fn update<T, F>(&mut self, f: F) -> FinanceResult<T>
    where
        F: FnOnce(&mut FinanceState) -> FinanceResult<T>,
    {
        let mut next = self.state.clone();
        let value = f(&mut next)?;
        write_json_atomic(&self.path, &next)?;
        self.state = next;
        log::info!("saved finance state to {}", self.path.display());
        Ok(value)
    }
}

/// Write to a temp file in the same directory, then rename over the target
fn write_json_atomic(path: &Path, state: &FinanceState) -> FinanceResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_extension("json.tmp");
    let file = File::create(&temp_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, state)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::{DailyOverride, EventType};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_starts_from_defaults() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("finance.json")).unwrap();
        assert_eq!(store.state(), &FinanceState::default());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_mutations_persist_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("finance.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.add_transaction("2026-01-05", EventType::Income, 5000.0, "Salary").unwrap();
        store.set_daily_override(DailyOverride::new("2026-01-06", 20.0)).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.state(), store.state());
        assert_eq!(reopened.events().len(), 1);
        assert_eq!(reopened.overrides().len(), 1);
    }

    #[test]
    fn test_rejected_mutation_does_not_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("finance.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        assert!(store.set_daily_override(DailyOverride::new("not-a-date", 20.0)).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_reads_dashboard_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("finance.json");
        fs::write(
            &path,
            r#"{"config":{"initialBalance":0,"monthlyFixedBudget":1500,"cycleStartDate":1,"monthlyIncomeGoal":3000},
               "events":[{"id":"1","date":"2026-01-05","type":"income","amount":5000,"category":"Salary","isRecurring":true}],
               "overrides":[],"realExpenses":[],"savingsGoals":{"annual":20000,"monthly":1500},
               "savingsEntries":[],"categoryBudgets":{}}"#,
        )
        .unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.events()[0].amount, 5000.0);
        assert_eq!(store.config().monthly_income_goal, Some(3000.0));
    }
}
