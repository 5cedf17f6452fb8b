//! Entitas bisnis alur SPJ
//!
//! Sebelas form per pengajuan adalah konstanta domain, bukan konfigurasi:
//! jumlah form, tipe form, dan peran penandatangan per tipe bersifat tetap.

use serde::{Deserialize, Serialize};

use crate::models::users::entities::UserRole;

/// Jumlah form tetap per pengajuan SPJ
pub const FORM_COUNT: i32 = 11;

/// Form yang wajib ditandatangani sebelum verifikasi tahap pertama (1..=10)
pub const VERIFIABLE_FORM_MAX: i32 = 10;

/// Form yang dapat dicetak sebagai draf tanda tangan basah (1..=3)
pub const DRAFT_FORM_MAX: i32 = 3;

/// Peran penandatangan yang disyaratkan untuk tiap tipe form.
///
/// Tabel ini adalah konstanta domain tertutup. `None` untuk tipe di luar
/// 1..=11.
pub fn required_signer_role(form_type: i32) -> Option<UserRole> {
    match form_type {
        1 | 2 | 5 => Some(UserRole::Ppk),
        3 | 7 => Some(UserRole::Pa),
        4 => Some(UserRole::Operator),
        6 | 9 => Some(UserRole::Pptk),
        8 | 10 => Some(UserRole::PengurusBarang),
        11 => Some(UserRole::PpkKeuangan),
        _ => None,
    }
}

// Status pengajuan SPJ: draft -> verified -> completed, dengan cabang
// rejected dari kedua gerbang. completed dan rejected bersifat terminal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SpjStatus {
    Draft,
    Verified,
    Completed,
    Rejected,
}

impl SpjStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpjStatus::Draft => "draft",
            SpjStatus::Verified => "verified",
            SpjStatus::Completed => "completed",
            SpjStatus::Rejected => "rejected",
        }
    }

    /// Status terminal: tidak ada operasi yang keluar dari sini
    pub fn is_terminal(&self) -> bool {
        matches!(self, SpjStatus::Completed | SpjStatus::Rejected)
    }
}

impl std::fmt::Display for SpjStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SpjStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(SpjStatus::Draft),
            "verified" => Ok(SpjStatus::Verified),
            "completed" => Ok(SpjStatus::Completed),
            "rejected" => Ok(SpjStatus::Rejected),
            _ => Err(format!("Invalid SPJ status: {s}")),
        }
    }
}

// Status satu form: filled -> (physical_signed) -> signed | rejected.
// Satu-satunya jalan keluar dari rejected adalah pengeditan ulang, yang
// mengembalikan status ke filled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    Filled,
    PhysicalSigned,
    Signed,
    Rejected,
}

impl FormStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormStatus::Filled => "filled",
            FormStatus::PhysicalSigned => "physical_signed",
            FormStatus::Signed => "signed",
            FormStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for FormStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FormStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "filled" => Ok(FormStatus::Filled),
            "physical_signed" => Ok(FormStatus::PhysicalSigned),
            "signed" => Ok(FormStatus::Signed),
            "rejected" => Ok(FormStatus::Rejected),
            _ => Err(format!("Invalid form status: {s}")),
        }
    }
}

// Jenis berkas pindaian tanda tangan basah
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScanFileType {
    Pdf,
    Excel,
}

impl ScanFileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanFileType::Pdf => "pdf",
            ScanFileType::Excel => "excel",
        }
    }
}

impl std::str::FromStr for ScanFileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(ScanFileType::Pdf),
            "excel" => Ok(ScanFileType::Excel),
            _ => Err(format!("Invalid scan file type: {s}")),
        }
    }
}

/// Keputusan penandatanganan.
///
/// Kontrak API lama: "notes terisi" berarti penolakan. Di batas API hal itu
/// dipetakan ke varian eksplisit agar logika internal bercabang pada tag,
/// bukan pada nullability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignDecision {
    Approve,
    Reject { reason: String },
}

impl SignDecision {
    /// Terjemahkan `notes` opsional dari klien menjadi keputusan eksplisit.
    /// String kosong atau spasi saja dianggap persetujuan.
    pub fn from_notes(notes: Option<String>) -> Self {
        match notes {
            Some(reason) if !reason.trim().is_empty() => SignDecision::Reject { reason },
            _ => SignDecision::Approve,
        }
    }
}

// Entitas pengajuan SPJ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpjSubmission {
    pub id: i64,
    pub rup_id: String,
    pub year: i32,
    pub activity_name: String,
    pub activity: String,
    pub status: SpjStatus,
    pub operator_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// Entitas satu form SPJ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpjForm {
    pub id: i64,
    pub spj_id: i64,
    pub form_type: i32,
    pub data: serde_json::Value,
    pub status: FormStatus,
    pub notes: Option<String>,
    pub scan_url: Option<String>,
    pub scan_file_type: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// Lembar verifikasi dua tahap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSheet {
    pub id: i64,
    pub spj_id: i64,
    pub validator_id: Option<i64>,
    pub verifier_id: Option<i64>,
    pub status: String,
    pub notes: Option<String>,
    pub final_notes: Option<String>,
    pub signed_at: Option<chrono::DateTime<chrono::Utc>>,
}

// Metadata pengajuan untuk kop dokumen draf
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpjMetadata {
    pub rup_id: String,
    pub year: i32,
    pub activity_name: String,
    pub activity: String,
    pub status: SpjStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signer_role_table() {
        // tabel peran per tipe form adalah konstanta domain
        assert_eq!(required_signer_role(1), Some(UserRole::Ppk));
        assert_eq!(required_signer_role(2), Some(UserRole::Ppk));
        assert_eq!(required_signer_role(3), Some(UserRole::Pa));
        assert_eq!(required_signer_role(4), Some(UserRole::Operator));
        assert_eq!(required_signer_role(5), Some(UserRole::Ppk));
        assert_eq!(required_signer_role(6), Some(UserRole::Pptk));
        assert_eq!(required_signer_role(7), Some(UserRole::Pa));
        assert_eq!(required_signer_role(8), Some(UserRole::PengurusBarang));
        assert_eq!(required_signer_role(9), Some(UserRole::Pptk));
        assert_eq!(required_signer_role(10), Some(UserRole::PengurusBarang));
        assert_eq!(required_signer_role(11), Some(UserRole::PpkKeuangan));
    }

    #[test]
    fn test_signer_role_out_of_range() {
        assert_eq!(required_signer_role(0), None);
        assert_eq!(required_signer_role(12), None);
        assert_eq!(required_signer_role(-1), None);
    }

    #[test]
    fn test_sign_decision_from_notes() {
        assert_eq!(SignDecision::from_notes(None), SignDecision::Approve);
        assert_eq!(
            SignDecision::from_notes(Some("".to_string())),
            SignDecision::Approve
        );
        assert_eq!(
            SignDecision::from_notes(Some("   ".to_string())),
            SignDecision::Approve
        );
        assert_eq!(
            SignDecision::from_notes(Some("lampiran kurang".to_string())),
            SignDecision::Reject {
                reason: "lampiran kurang".to_string()
            }
        );
    }

    #[test]
    fn test_spj_status_terminal() {
        assert!(!SpjStatus::Draft.is_terminal());
        assert!(!SpjStatus::Verified.is_terminal());
        assert!(SpjStatus::Completed.is_terminal());
        assert!(SpjStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_status_round_trip() {
        for status in ["filled", "physical_signed", "signed", "rejected"] {
            assert_eq!(status.parse::<FormStatus>().unwrap().as_str(), status);
        }
        for status in ["draft", "verified", "completed", "rejected"] {
            assert_eq!(status.parse::<SpjStatus>().unwrap().as_str(), status);
        }
    }
}
