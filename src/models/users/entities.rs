use serde::{Deserialize, Serialize};

// Peran pengguna: tujuh peran tetap dalam alur SPJ
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,          // pengelola akun
    Operator,       // pembuat dan pengisi SPJ
    Ppk,            // Pejabat Pembuat Komitmen
    Pptk,           // Pejabat Pelaksana Teknis Kegiatan
    PengurusBarang, // verifikator tahap pertama
    PpkKeuangan,    // verifikator akhir
    Pa,             // Pengguna Anggaran
}

impl UserRole {
    pub const ADMIN: &'static str = "ADMIN";
    pub const OPERATOR: &'static str = "OPERATOR";
    pub const PPK: &'static str = "PPK";
    pub const PPTK: &'static str = "PPTK";
    pub const PENGURUS_BARANG: &'static str = "PENGURUS_BARANG";
    pub const PPK_KEUANGAN: &'static str = "PPK_KEUANGAN";
    pub const PA: &'static str = "PA";

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => Self::ADMIN,
            UserRole::Operator => Self::OPERATOR,
            UserRole::Ppk => Self::PPK,
            UserRole::Pptk => Self::PPTK,
            UserRole::PengurusBarang => Self::PENGURUS_BARANG,
            UserRole::PpkKeuangan => Self::PPK_KEUANGAN,
            UserRole::Pa => Self::PA,
        }
    }

    pub fn all_roles() -> &'static [&'static UserRole] {
        &[
            &Self::Admin,
            &Self::Operator,
            &Self::Ppk,
            &Self::Pptk,
            &Self::PengurusBarang,
            &Self::PpkKeuangan,
            &Self::Pa,
        ]
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "Peran tidak valid: '{s}'. Peran yang didukung: ADMIN, OPERATOR, PPK, PPTK, PENGURUS_BARANG, PPK_KEUANGAN, PA"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::ADMIN => Ok(UserRole::Admin),
            Self::OPERATOR => Ok(UserRole::Operator),
            Self::PPK => Ok(UserRole::Ppk),
            Self::PPTK => Ok(UserRole::Pptk),
            Self::PENGURUS_BARANG => Ok(UserRole::PengurusBarang),
            Self::PPK_KEUANGAN => Ok(UserRole::PpkKeuangan),
            Self::PA => Ok(UserRole::Pa),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// Entitas pengguna
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)] // jangan ikut terserialisasi ke respons JSON
    pub password_hash: String,
    pub role: UserRole,
    pub nip: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    // Membuat access token JWT untuk pengguna ini
    pub fn generate_access_token(&self) -> Result<String, String> {
        crate::utils::jwt::JwtUtils::generate_access_token(self.id, self.role.as_str())
            .map_err(|e| format!("Gagal membuat access token: {e}"))
    }

    // Membuat pasangan token (access + refresh)
    pub fn generate_token_pair(&self) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(self.id, self.role.as_str())
            .map_err(|e| format!("Gagal membuat pasangan token: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in UserRole::all_roles() {
            let parsed: UserRole = role.as_str().parse().unwrap();
            assert_eq!(&&parsed, role);
        }
    }

    #[test]
    fn test_invalid_role() {
        assert!("BENDAHARA".parse::<UserRole>().is_err());
        assert!("operator".parse::<UserRole>().is_err());
    }
}
