use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One stored snapshot of per-user client data. Unique by (email, serial);
/// the serial disambiguates multiple snapshots for the same address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDataRecord {
    pub email: String,
    pub serial: i32,
    pub data: Value,
    pub updated_at: DateTime<Utc>,
}
