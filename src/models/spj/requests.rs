use serde::{Deserialize, Serialize};

// Permintaan pembuatan pengajuan SPJ baru
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSpjRequest {
    pub rup_id: String,
    pub year: i32,
    pub activity_name: String,
    pub activity: String,
}

// Badan permintaan tanda tangan: notes terisi berarti penolakan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignFormRequest {
    pub notes: Option<String>,
}

// Permintaan verifikasi tahap pertama (Pengurus Barang)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitVerificationRequest {
    pub is_valid: bool,
    pub notes: Option<String>,
}

// Permintaan finalisasi (PPK Keuangan)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizeSpjRequest {
    pub is_final_valid: bool,
    pub notes: Option<String>,
}
