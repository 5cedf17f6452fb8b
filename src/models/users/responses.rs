use serde::{Deserialize, Serialize};

use super::entities::UserRole;

// Ringkasan pengguna untuk daftar admin dan relasi SPJ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub nip: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<super::entities::User> for UserSummary {
    fn from(user: super::entities::User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            nip: user.nip,
            created_at: user.created_at,
        }
    }
}
