use serde::{Deserialize, Serialize};

// Item daftar log aktivitas, digabung dengan ringkasan pelaku dan SPJ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLogListItem {
    pub id: i64,
    pub spj_id: i64,
    pub action: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub user: ActivityLogUser,
    pub spj: ActivityLogSpj,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLogUser {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub nip: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLogSpj {
    pub id: i64,
    pub rup_id: String,
    pub year: i32,
    pub activity_name: String,
    pub status: String,
}
