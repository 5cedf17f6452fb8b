use serde::{Deserialize, Serialize};

use super::entities::{FormStatus, SpjForm, SpjMetadata, SpjStatus, SpjSubmission, VerificationSheet};
use crate::models::users::responses::UserSummary;

// Pengajuan SPJ dengan seluruh relasinya (detail)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpjWithRelations {
    #[serde(flatten)]
    pub submission: SpjSubmission,
    pub forms: Vec<SpjForm>,
    pub operator: UserSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<VerificationSheetDetail>,
}

// Lembar verifikasi beserta identitas validator/verifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSheetDetail {
    #[serde(flatten)]
    pub sheet: VerificationSheet,
    pub validator: Option<UserSummary>,
    pub verifier: Option<UserSummary>,
}

// Hasil operasi tanda tangan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignFormResult {
    pub status: FormStatus,
    pub notes: Option<String>,
}

// Hasil verifikasi tahap pertama
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub status: String,
    pub notes: Option<String>,
}

// Hasil finalisasi
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizeResult {
    pub status: SpjStatus,
}

// Draf form untuk dicetak: data form + metadata pengajuan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftForm {
    pub form_data: serde_json::Value,
    pub metadata: SpjMetadata,
}
