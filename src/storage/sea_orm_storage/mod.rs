//! Implementasi penyimpanan SeaORM
//!
//! Lapisan penyimpanan terpadu; mendukung SQLite, PostgreSQL, dan MySQL.
//! Seluruh aturan alur kerja SPJ (matriks peran, transisi status, log
//! aktivitas) dijalankan di sini dalam transaksi basis data.

mod activity_logs;
mod forms;
mod submissions;
mod users;
mod verification;

use crate::config::AppConfig;
use crate::errors::{Result, SuperjeError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// Implementasi penyimpanan SeaORM
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// Membuat instans penyimpanan dari konfigurasi aplikasi
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::new_with_url(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// Membuat instans penyimpanan dari URL eksplisit (juga dipakai pengujian)
    pub async fn new_with_url(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // Pilih cara koneksi sesuai jenis basis data
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // Jalankan migrasi
        Migrator::up(&db, None)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Migrasi basis data gagal: {e}")))?;

        info!("SeaORM storage initialized, database: {}", db_url);

        Ok(Self { db })
    }

    /// Koneksi khusus SQLite (WAL + pragma)
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        // Basis data dalam memori hanya boleh satu koneksi agar skema tidak hilang
        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let max_connections = if in_memory { 1 } else { pool_size };

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SuperjeError::database_config(format!("URL SQLite tidak valid: {e}")))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("mmap_size", "536870912")
                .pragma("wal_autocheckpoint", "1000");
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SuperjeError::database_connection(format!("Koneksi SQLite gagal: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// Koneksi generik (PostgreSQL, MySQL, dsb.)
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SuperjeError::database_connection(format!("Tidak dapat terhubung ke basis data: {e}")))
    }

    /// Menebak jenis basis data dari URL dan membentuk URL koneksi
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SuperjeError::database_config(format!(
                "Jenis basis data tidak dikenali dari URL: {url}. Didukung: sqlite://, postgres://, mysql://, atau berkas .db/.sqlite"
            )))
        }
    }

    /// Menambahkan satu baris log aktivitas pada koneksi/transaksi yang diberikan
    pub(crate) async fn append_log<C: ConnectionTrait>(
        conn: &C,
        spj_id: i64,
        user_id: i64,
        action: &str,
    ) -> Result<()> {
        use crate::entity::prelude::ActivityLogActiveModel;
        use sea_orm::{ActiveModelTrait, Set};

        let model = ActivityLogActiveModel {
            spj_id: Set(spj_id),
            user_id: Set(user_id),
            action: Set(action.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .insert(conn)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal mencatat aktivitas: {e}")))?;

        Ok(())
    }
}

// Implementasi Storage trait
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // Modul pengguna
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>> {
        self.list_users_impl().await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool> {
        self.update_password_impl(id, password_hash).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // Modul pengajuan SPJ
    async fn create_spj_submission(
        &self,
        operator_id: i64,
        req: CreateSpjRequest,
    ) -> Result<SpjSubmission> {
        self.create_spj_submission_impl(operator_id, req).await
    }

    async fn list_spj_submissions(&self, owner_filter: Option<i64>) -> Result<Vec<SpjSubmission>> {
        self.list_spj_submissions_impl(owner_filter).await
    }

    async fn get_spj_with_relations(&self, spj_id: i64) -> Result<Option<SpjWithRelations>> {
        self.get_spj_with_relations_impl(spj_id).await
    }

    async fn get_spj_by_id(&self, spj_id: i64) -> Result<Option<SpjSubmission>> {
        self.get_spj_by_id_impl(spj_id).await
    }

    // Modul form
    async fn update_spj_form(
        &self,
        spj_id: i64,
        form_type: i32,
        data: JsonValue,
        operator_id: i64,
    ) -> Result<()> {
        self.update_spj_form_impl(spj_id, form_type, data, operator_id)
            .await
    }

    async fn set_form_scan(
        &self,
        spj_id: i64,
        form_type: i32,
        scan_url: &str,
        file_type: ScanFileType,
        operator_id: i64,
    ) -> Result<()> {
        self.set_form_scan_impl(spj_id, form_type, scan_url, file_type, operator_id)
            .await
    }

    async fn sign_spj_form(
        &self,
        spj_id: i64,
        form_type: i32,
        signer_id: i64,
        signer_role: UserRole,
        decision: SignDecision,
    ) -> Result<SignFormResult> {
        self.sign_spj_form_impl(spj_id, form_type, signer_id, signer_role, decision)
            .await
    }

    async fn get_draft_form(&self, spj_id: i64, form_type: i32) -> Result<DraftForm> {
        self.get_draft_form_impl(spj_id, form_type).await
    }

    // Modul verifikasi
    async fn submit_verification(
        &self,
        spj_id: i64,
        validator_id: i64,
        is_valid: bool,
        notes: Option<String>,
    ) -> Result<VerificationResult> {
        self.submit_verification_impl(spj_id, validator_id, is_valid, notes)
            .await
    }

    async fn finalize_spj(
        &self,
        spj_id: i64,
        verifier_id: i64,
        is_final_valid: bool,
        notes: Option<String>,
    ) -> Result<FinalizeResult> {
        self.finalize_spj_impl(spj_id, verifier_id, is_final_valid, notes)
            .await
    }

    // Modul log aktivitas
    async fn list_activity_logs(&self) -> Result<Vec<ActivityLogListItem>> {
        self.list_activity_logs_impl().await
    }

    async fn log_activity(&self, spj_id: i64, user_id: i64, action: &str) -> Result<()> {
        Self::append_log(&self.db, spj_id, user_id, action).await
    }
}
