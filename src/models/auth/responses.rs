use serde::{Deserialize, Serialize};

use crate::models::users::entities::User;

// Respons login: token beserta data pengguna
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub user: User,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
