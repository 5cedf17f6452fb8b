use serde::{Deserialize, Serialize};

use super::entities::UserRole;

// Permintaan pembuatan pengguna (hanya ADMIN)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub nip: Option<String>,
}

// Permintaan pembaruan data pengguna oleh ADMIN
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    pub nip: Option<String>,
    pub role: UserRole,
}
