use serde::{Deserialize, Serialize};

// Satu catatan log aktivitas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub id: i64,
    pub spj_id: i64,
    pub user_id: i64,
    pub action: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
