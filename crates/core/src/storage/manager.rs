use chrono::NaiveDate;
use serde_json::Value;

use crate::errors::CoreError;
use crate::models::profile::FinancialProfile;

use super::kv::KeyValueStore;
use super::migration;

/// Top-level keys of which at least one must be present in an import file.
const IMPORT_REQUIRED_KEYS: [&str; 2] = ["budget", "income"];

/// High-level storage operations: profile ⇄ JSON, key-value persistence,
/// export and import.
pub struct StorageManager;

impl StorageManager {
    /// Serialize a profile to the compact JSON blob that gets persisted.
    pub fn save_to_string(profile: &FinancialProfile) -> Result<String, CoreError> {
        serde_json::to_string(profile)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize profile: {e}")))
    }

    /// Parse and migrate a persisted blob.
    pub fn load_from_str(json: &str) -> Result<FinancialProfile, CoreError> {
        migration::migrate_str(json)
    }

    /// Write the profile under `key`, replacing whatever was there.
    pub fn save(
        store: &mut dyn KeyValueStore,
        key: &str,
        profile: &FinancialProfile,
    ) -> Result<(), CoreError> {
        let json = Self::save_to_string(profile)?;
        store.set(key, &json)
    }

    /// Read the profile stored under `key`; `Ok(None)` if nothing is stored.
    pub fn load(store: &dyn KeyValueStore, key: &str) -> Result<Option<FinancialProfile>, CoreError> {
        match store.get(key)? {
            Some(json) => Self::load_from_str(&json).map(Some),
            None => Ok(None),
        }
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Pretty-printed JSON of the profile, for a downloadable backup.
    pub fn export_json(profile: &FinancialProfile) -> Result<String, CoreError> {
        serde_json::to_string_pretty(profile)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize profile: {e}")))
    }

    /// Backup file name for a given day, e.g. `open-budget-2025-01-15.json`.
    #[must_use]
    pub fn export_file_name(date: NaiveDate) -> String {
        format!("open-budget-{}.json", date.format("%Y-%m-%d"))
    }

    /// Validate and migrate an import file.
    ///
    /// The file must be a JSON object with a `budget` or `income` key.
    pub fn parse_import(json: &str) -> Result<FinancialProfile, CoreError> {
        let raw: Value = serde_json::from_str(json)
            .map_err(|e| CoreError::ImportRejected(format!("Not valid JSON: {e}")))?;

        let recognised = raw
            .as_object()
            .is_some_and(|obj| IMPORT_REQUIRED_KEYS.iter().any(|k| obj.contains_key(*k)));
        if !recognised {
            return Err(CoreError::ImportRejected(
                "File does not look like a budget backup (no 'budget' or 'income')".into(),
            ));
        }

        migration::migrate(raw).map_err(|e| CoreError::ImportRejected(e.to_string()))
    }
}
