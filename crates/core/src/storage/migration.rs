use serde_json::{Map, Value};

use crate::errors::CoreError;
use crate::models::profile::FinancialProfile;

/// Current profile schema version.
///
/// - 1: unversioned blob; fields may be missing, the asset block may be
///   stored under `wealth`, cleared number inputs appear as `null`.
/// - 2: `schemaVersion` stamped, every top-level field present.
pub const CURRENT_SCHEMA_VERSION: u16 = 2;

/// Field name carrying the schema version inside the blob.
pub const VERSION_FIELD: &str = "schemaVersion";

/// Upgrade a raw persisted or imported blob to the current profile shape.
pub fn migrate(raw: Value) -> Result<FinancialProfile, CoreError> {
    let Value::Object(mut obj) = raw else {
        return Err(CoreError::InvalidFileFormat(
            "Profile data must be a JSON object".into(),
        ));
    };

    let version = read_version(&obj)?;
    if version == 0 || version > CURRENT_SCHEMA_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    if version < 2 {
        log::debug!("Migrating profile from schema 1 to 2");
        migrate_v1_to_v2(&mut obj)?;
    }

    let profile: FinancialProfile = serde_json::from_value(Value::Object(obj))
        .map_err(|e| CoreError::Deserialization(format!("Failed to read profile: {e}")))?;
    Ok(profile)
}

/// Parse a JSON string and migrate it.
pub fn migrate_str(json: &str) -> Result<FinancialProfile, CoreError> {
    let raw: Value = serde_json::from_str(json)?;
    migrate(raw)
}

fn read_version(obj: &Map<String, Value>) -> Result<u16, CoreError> {
    match obj.get(VERSION_FIELD) {
        None | Some(Value::Null) => Ok(1),
        Some(v) => v
            .as_u64()
            .and_then(|n| u16::try_from(n).ok())
            .ok_or_else(|| {
                CoreError::InvalidFileFormat(format!("Invalid {VERSION_FIELD}: {v}"))
            }),
    }
}

/// Rename `wealth` to `assets`, then fill every missing or null top-level
/// field from the default profile.
fn migrate_v1_to_v2(obj: &mut Map<String, Value>) -> Result<(), CoreError> {
    let has_assets = obj.get("assets").is_some_and(|v| !v.is_null());
    if !has_assets {
        if let Some(wealth) = obj.remove("wealth") {
            obj.insert("assets".into(), wealth);
        }
    }

    let defaults = serde_json::to_value(FinancialProfile::default())
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize defaults: {e}")))?;
    if let Value::Object(defaults) = defaults {
        for (key, value) in defaults {
            let missing = obj.get(&key).map_or(true, Value::is_null);
            if missing {
                obj.insert(key, value);
            }
        }
    }

    obj.insert(VERSION_FIELD.into(), Value::from(CURRENT_SCHEMA_VERSION));
    Ok(())
}
