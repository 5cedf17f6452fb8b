use super::SeaOrmStorage;
use crate::entity::prelude::{
    SpjForms, SpjSubmissions, Users, VerificationSheetActiveModel, VerificationSheets,
};
use crate::entity::{spj_forms, spj_submissions, verification_sheets};
use crate::errors::{Result, SuperjeError};
use crate::models::spj::{
    entities::{FORM_COUNT, FormStatus, SpjStatus, VERIFIABLE_FORM_MAX},
    responses::{FinalizeResult, VerificationResult},
};
use crate::models::users::entities::UserRole;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
    TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    /// Verifikasi tahap pertama oleh Pengurus Barang.
    ///
    /// Prasyarat: seluruh form 1-10 berstatus `signed`. Hasilnya dicerminkan
    /// ke form 11 dan lembar verifikasi, lalu status pengajuan menjadi
    /// `verified` atau `rejected`. Semuanya dalam satu transaksi.
    pub async fn submit_verification_impl(
        &self,
        spj_id: i64,
        validator_id: i64,
        is_valid: bool,
        notes: Option<String>,
    ) -> Result<VerificationResult> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal memulai transaksi: {e}")))?;

        let validator = Users::find_by_id(validator_id)
            .one(&txn)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal mengambil pengguna: {e}")))?
            .ok_or_else(|| SuperjeError::not_found("Pengguna tidak ditemukan"))?;
        let validator = validator.into_user();

        if validator.role != UserRole::PengurusBarang {
            return Err(SuperjeError::authorization(
                "Hanya Pengurus Barang yang dapat mengisi lembar verifikasi",
            ));
        }

        Self::load_mutable_submission(&txn, spj_id).await?;

        // Seluruh form 1-10 harus sudah ditandatangani
        let signed_count = SpjForms::find()
            .filter(spj_forms::Column::SpjId.eq(spj_id))
            .filter(spj_forms::Column::FormType.lte(VERIFIABLE_FORM_MAX))
            .filter(spj_forms::Column::Status.eq(FormStatus::Signed.to_string()))
            .count(&txn)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal menghitung form: {e}")))?;

        if signed_count < VERIFIABLE_FORM_MAX as u64 {
            return Err(SuperjeError::precondition_failed(format!(
                "Semua form 1-{VERIFIABLE_FORM_MAX} harus ditandatangani sebelum verifikasi"
            )));
        }

        let now = chrono::Utc::now().timestamp();
        let new_status = if is_valid {
            SpjStatus::Verified
        } else {
            SpjStatus::Rejected
        };
        // Status lembar verifikasi punya kosakata sendiri, terpisah dari
        // status pengajuan
        let sheet_status = if is_valid { "valid" } else { "invalid" };

        // Cerminkan hasil verifikasi ke form 11
        let mirror = serde_json::json!({
            "validator_nama": validator.name,
            "validator_nip": validator.nip,
            "catatan_verifikasi": notes,
            "status_verifikasi": sheet_status,
        });
        Self::write_form_eleven(&txn, spj_id, mirror, if is_valid {
            FormStatus::Filled
        } else {
            FormStatus::Rejected
        })
        .await?;

        // Upsert lembar verifikasi (maksimal satu per pengajuan)
        let existing = VerificationSheets::find()
            .filter(verification_sheets::Column::SpjId.eq(spj_id))
            .one(&txn)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal mengambil lembar verifikasi: {e}")))?;

        match existing {
            Some(sheet) => {
                let mut model: VerificationSheetActiveModel = sheet.into();
                model.validator_id = Set(Some(validator_id));
                model.status = Set(sheet_status.to_string());
                model.notes = Set(notes.clone());
                model.updated_at = Set(now);
                model.update(&txn).await.map_err(|e| {
                    SuperjeError::database_operation(format!("Gagal memperbarui lembar verifikasi: {e}"))
                })?;
            }
            None => {
                let model = VerificationSheetActiveModel {
                    spj_id: Set(spj_id),
                    validator_id: Set(Some(validator_id)),
                    status: Set(sheet_status.to_string()),
                    notes: Set(notes.clone()),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                model.insert(&txn).await.map_err(|e| {
                    SuperjeError::database_operation(format!("Gagal membuat lembar verifikasi: {e}"))
                })?;
            }
        }

        Self::set_submission_status(&txn, spj_id, &new_status).await?;
        Self::append_log(&txn, spj_id, validator_id, "verify").await?;

        txn.commit()
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal menyimpan transaksi: {e}")))?;

        Ok(VerificationResult {
            status: sheet_status.to_string(),
            notes,
        })
    }

    /// Finalisasi oleh PPK Keuangan.
    ///
    /// Prasyarat: pengajuan berstatus `verified`. Form 11 dan lembar
    /// verifikasi dimutakhirkan, lalu pengajuan mencapai status terminal
    /// `completed` atau `rejected`.
    pub async fn finalize_spj_impl(
        &self,
        spj_id: i64,
        verifier_id: i64,
        is_final_valid: bool,
        notes: Option<String>,
    ) -> Result<FinalizeResult> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal memulai transaksi: {e}")))?;

        let verifier = Users::find_by_id(verifier_id)
            .one(&txn)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal mengambil pengguna: {e}")))?
            .ok_or_else(|| SuperjeError::not_found("Pengguna tidak ditemukan"))?;
        let verifier = verifier.into_user();

        if verifier.role != UserRole::PpkKeuangan {
            return Err(SuperjeError::authorization(
                "Hanya PPK Keuangan yang dapat melakukan verifikasi akhir",
            ));
        }

        let submission = Self::load_mutable_submission(&txn, spj_id).await?;
        let status = submission
            .status
            .parse::<SpjStatus>()
            .unwrap_or(SpjStatus::Draft);
        if status != SpjStatus::Verified {
            return Err(SuperjeError::precondition_failed(
                "SPJ belum diverifikasi oleh Pengurus Barang",
            ));
        }

        let sheet = VerificationSheets::find()
            .filter(verification_sheets::Column::SpjId.eq(spj_id))
            .one(&txn)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal mengambil lembar verifikasi: {e}")))?
            .ok_or_else(|| SuperjeError::not_found("Lembar verifikasi tidak ditemukan"))?;

        let now = chrono::Utc::now().timestamp();
        let new_status = if is_final_valid {
            SpjStatus::Completed
        } else {
            SpjStatus::Rejected
        };

        // Gabungkan hasil tahap akhir ke data form 11 yang sudah ada
        let form_eleven = SpjForms::find()
            .filter(spj_forms::Column::SpjId.eq(spj_id))
            .filter(spj_forms::Column::FormType.eq(FORM_COUNT))
            .one(&txn)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal mengambil form: {e}")))?
            .ok_or_else(|| SuperjeError::not_found("Form tidak ditemukan"))?;

        let mut data = form_eleven.data.clone();
        if let Some(map) = data.as_object_mut() {
            map.insert(
                "verifier_nama".to_string(),
                serde_json::json!(verifier.name),
            );
            map.insert("verifier_nip".to_string(), serde_json::json!(verifier.nip));
            map.insert("catatan_final".to_string(), serde_json::json!(notes));
            map.insert(
                "status_final".to_string(),
                serde_json::json!(new_status.as_str()),
            );
        }
        Self::write_form_eleven(&txn, spj_id, data, if is_final_valid {
            FormStatus::Signed
        } else {
            FormStatus::Rejected
        })
        .await?;

        let mut model: VerificationSheetActiveModel = sheet.into();
        model.verifier_id = Set(Some(verifier_id));
        model.status = Set(new_status.to_string());
        model.final_notes = Set(notes);
        model.signed_at = Set(Some(now));
        model.updated_at = Set(now);
        model.update(&txn).await.map_err(|e| {
            SuperjeError::database_operation(format!("Gagal memperbarui lembar verifikasi: {e}"))
        })?;

        Self::set_submission_status(&txn, spj_id, &new_status).await?;
        Self::append_log(&txn, spj_id, verifier_id, "finalize").await?;

        txn.commit()
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal menyimpan transaksi: {e}")))?;

        Ok(FinalizeResult { status: new_status })
    }

    /// Menulis data dan status form 11 (cermin lembar verifikasi)
    async fn write_form_eleven<C: ConnectionTrait>(
        conn: &C,
        spj_id: i64,
        data: serde_json::Value,
        status: FormStatus,
    ) -> Result<()> {
        let updated = SpjForms::update_many()
            .col_expr(spj_forms::Column::Data, Expr::value(data))
            .col_expr(spj_forms::Column::Status, Expr::value(status.to_string()))
            .col_expr(
                spj_forms::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(spj_forms::Column::SpjId.eq(spj_id))
            .filter(spj_forms::Column::FormType.eq(FORM_COUNT))
            .exec(conn)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal memperbarui form 11: {e}")))?;

        if updated.rows_affected == 0 {
            return Err(SuperjeError::not_found("Form 11 tidak ditemukan"));
        }

        Ok(())
    }

    /// Memutakhirkan status pengajuan
    async fn set_submission_status<C: ConnectionTrait>(
        conn: &C,
        spj_id: i64,
        status: &SpjStatus,
    ) -> Result<()> {
        SpjSubmissions::update_many()
            .col_expr(
                spj_submissions::Column::Status,
                Expr::value(status.to_string()),
            )
            .col_expr(
                spj_submissions::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(spj_submissions::Column::Id.eq(spj_id))
            .exec(conn)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal memperbarui status SPJ: {e}")))?;

        Ok(())
    }
}
