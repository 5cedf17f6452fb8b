use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::models::{
    activity_logs::responses::ActivityLogListItem,
    spj::{
        entities::{ScanFileType, SignDecision, SpjSubmission},
        requests::CreateSpjRequest,
        responses::{DraftForm, FinalizeResult, SignFormResult, SpjWithRelations, VerificationResult},
    },
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, UpdateUserRequest},
        responses::UserSummary,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Manajemen pengguna
    // Membuat pengguna (password pada request sudah berupa hash)
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // Mengambil pengguna berdasarkan ID
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // Mengambil pengguna berdasarkan email
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // Daftar seluruh pengguna, terbaru dulu
    async fn list_users(&self) -> Result<Vec<UserSummary>>;
    // Memperbarui data pengguna
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // Menghapus pengguna
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // Mengganti hash kata sandi
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool>;
    // Jumlah pengguna terdaftar
    async fn count_users(&self) -> Result<u64>;

    /// Siklus hidup pengajuan SPJ
    // Membuat pengajuan + 11 form kosong + log, dalam satu transaksi
    async fn create_spj_submission(
        &self,
        operator_id: i64,
        req: CreateSpjRequest,
    ) -> Result<SpjSubmission>;
    // Daftar pengajuan; owner_filter membatasi ke milik satu operator
    async fn list_spj_submissions(&self, owner_filter: Option<i64>) -> Result<Vec<SpjSubmission>>;
    // Mengambil pengajuan beserta form, operator, dan lembar verifikasi
    async fn get_spj_with_relations(&self, spj_id: i64) -> Result<Option<SpjWithRelations>>;
    // Mengambil pengajuan saja
    async fn get_spj_by_id(&self, spj_id: i64) -> Result<Option<SpjSubmission>>;

    /// Pengisian dan penandatanganan form
    // Mengganti data form secara utuh, status kembali ke filled
    async fn update_spj_form(
        &self,
        spj_id: i64,
        form_type: i32,
        data: JsonValue,
        operator_id: i64,
    ) -> Result<()>;
    // Melampirkan pindaian tanda tangan basah, status physical_signed
    async fn set_form_scan(
        &self,
        spj_id: i64,
        form_type: i32,
        scan_url: &str,
        file_type: ScanFileType,
        operator_id: i64,
    ) -> Result<()>;
    // Menandatangani atau menolak form sesuai matriks peran
    async fn sign_spj_form(
        &self,
        spj_id: i64,
        form_type: i32,
        signer_id: i64,
        signer_role: UserRole,
        decision: SignDecision,
    ) -> Result<SignFormResult>;
    // Draf form 1-3 untuk dicetak dan ditandatangani basah
    async fn get_draft_form(&self, spj_id: i64, form_type: i32) -> Result<DraftForm>;

    /// Gerbang verifikasi dua tahap
    // Tahap pertama oleh Pengurus Barang; semua form 1-10 harus signed
    async fn submit_verification(
        &self,
        spj_id: i64,
        validator_id: i64,
        is_valid: bool,
        notes: Option<String>,
    ) -> Result<VerificationResult>;
    // Tahap akhir oleh PPK Keuangan; SPJ harus berstatus verified
    async fn finalize_spj(
        &self,
        spj_id: i64,
        verifier_id: i64,
        is_final_valid: bool,
        notes: Option<String>,
    ) -> Result<FinalizeResult>;

    /// Log aktivitas
    // Daftar log digabung identitas pelaku dan ringkasan SPJ, terbaru dulu
    async fn list_activity_logs(&self) -> Result<Vec<ActivityLogListItem>>;
    // Mencatat aktivitas di luar transaksi lain (mis. unduhan)
    async fn log_activity(&self, spj_id: i64, user_id: i64, action: &str) -> Result<()>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
