use super::SeaOrmStorage;
use crate::entity::prelude::{
    SignatureRecordActiveModel, SpjForms, SpjSubmissionModel, SpjSubmissions,
};
use crate::entity::spj_forms;
use crate::errors::{Result, SuperjeError};
use crate::models::spj::{
    entities::{
        DRAFT_FORM_MAX, FormStatus, ScanFileType, SignDecision, SpjStatus, required_signer_role,
    },
    responses::{DraftForm, SignFormResult},
};
use crate::models::users::entities::UserRole;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
    sea_query::Expr,
};
use sea_orm::TransactionTrait;
use serde_json::Value as JsonValue;

impl SeaOrmStorage {
    /// Memuat pengajuan dan menolak operasi tulis pada status terminal
    pub(crate) async fn load_mutable_submission<C: ConnectionTrait>(
        conn: &C,
        spj_id: i64,
    ) -> Result<SpjSubmissionModel> {
        let submission = SpjSubmissions::find_by_id(spj_id)
            .one(conn)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal mengambil SPJ: {e}")))?
            .ok_or_else(|| SuperjeError::not_found("SPJ tidak ditemukan"))?;

        let status = submission
            .status
            .parse::<SpjStatus>()
            .unwrap_or(SpjStatus::Draft);
        if status.is_terminal() {
            return Err(SuperjeError::precondition_failed(
                "SPJ sudah berstatus final dan tidak dapat diubah",
            ));
        }

        Ok(submission)
    }

    /// Mengganti data form secara utuh; status kembali ke `filled` sehingga
    /// form yang ditolak dapat diperbaiki dan ditandatangani ulang
    pub async fn update_spj_form_impl(
        &self,
        spj_id: i64,
        form_type: i32,
        data: JsonValue,
        operator_id: i64,
    ) -> Result<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal memulai transaksi: {e}")))?;

        let submission = Self::load_mutable_submission(&txn, spj_id).await?;
        if submission.operator_id != operator_id {
            return Err(SuperjeError::authorization(
                "Hanya operator pemilik yang dapat mengubah form SPJ ini",
            ));
        }

        let updated = SpjForms::update_many()
            .col_expr(spj_forms::Column::Data, Expr::value(data))
            .col_expr(
                spj_forms::Column::Status,
                Expr::value(FormStatus::Filled.to_string()),
            )
            .col_expr(
                spj_forms::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(spj_forms::Column::SpjId.eq(spj_id))
            .filter(spj_forms::Column::FormType.eq(form_type))
            .exec(&txn)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal memperbarui form: {e}")))?;

        if updated.rows_affected == 0 {
            return Err(SuperjeError::not_found("Form tidak ditemukan"));
        }

        Self::append_log(
            &txn,
            spj_id,
            operator_id,
            &format!("update_form_{form_type}"),
        )
        .await?;

        txn.commit()
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal menyimpan transaksi: {e}")))?;

        Ok(())
    }

    /// Melampirkan pindaian tanda tangan basah; status menjadi `physical_signed`
    pub async fn set_form_scan_impl(
        &self,
        spj_id: i64,
        form_type: i32,
        scan_url: &str,
        file_type: ScanFileType,
        operator_id: i64,
    ) -> Result<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal memulai transaksi: {e}")))?;

        let submission = Self::load_mutable_submission(&txn, spj_id).await?;
        if submission.operator_id != operator_id {
            return Err(SuperjeError::authorization(
                "Hanya operator pemilik yang dapat mengunggah pindaian",
            ));
        }

        let updated = SpjForms::update_many()
            .col_expr(spj_forms::Column::ScanUrl, Expr::value(scan_url))
            .col_expr(
                spj_forms::Column::ScanFileType,
                Expr::value(file_type.as_str()),
            )
            .col_expr(
                spj_forms::Column::Status,
                Expr::value(FormStatus::PhysicalSigned.to_string()),
            )
            .col_expr(
                spj_forms::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(spj_forms::Column::SpjId.eq(spj_id))
            .filter(spj_forms::Column::FormType.eq(form_type))
            .exec(&txn)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal menyimpan pindaian: {e}")))?;

        if updated.rows_affected == 0 {
            return Err(SuperjeError::not_found("Form tidak ditemukan"));
        }

        Self::append_log(
            &txn,
            spj_id,
            operator_id,
            &format!("upload_scan_{form_type}"),
        )
        .await?;

        txn.commit()
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal menyimpan transaksi: {e}")))?;

        Ok(())
    }

    /// Menandatangani atau menolak satu form.
    ///
    /// Matriks peran per tipe form bersifat tetap; penandatangan dengan peran
    /// lain ditolak. Pembaruan status memakai pembaruan terfilter sehingga
    /// dua penandatangan serentak tidak menghasilkan dua tanda tangan: yang
    /// kalah mendapat galat konflik atau prasyarat, tergantung status yang
    /// terbaca setelah kalah balapan.
    pub async fn sign_spj_form_impl(
        &self,
        spj_id: i64,
        form_type: i32,
        signer_id: i64,
        signer_role: UserRole,
        decision: SignDecision,
    ) -> Result<SignFormResult> {
        let required = required_signer_role(form_type)
            .ok_or_else(|| SuperjeError::validation(format!("Tipe form tidak valid: {form_type}")))?;
        if signer_role != required {
            return Err(SuperjeError::authorization(format!(
                "Form {form_type} hanya dapat ditandatangani oleh peran {required}"
            )));
        }

        let (new_status, notes) = match &decision {
            SignDecision::Approve => (FormStatus::Signed, None),
            SignDecision::Reject { reason } => (FormStatus::Rejected, Some(reason.clone())),
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal memulai transaksi: {e}")))?;

        // Pembaruan terfilter pada status yang masih dapat ditandatangani,
        // dijalankan sebagai pernyataan pertama supaya transaksi langsung
        // memegang kunci tulis. Nol baris berarti status sudah bergeser
        // sebelum pembaruan ini mendapat giliran.
        let updated = SpjForms::update_many()
            .col_expr(
                spj_forms::Column::Status,
                Expr::value(new_status.to_string()),
            )
            .col_expr(spj_forms::Column::Notes, Expr::value(notes.clone()))
            .col_expr(
                spj_forms::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(spj_forms::Column::SpjId.eq(spj_id))
            .filter(spj_forms::Column::FormType.eq(form_type))
            .filter(spj_forms::Column::Status.is_in([
                FormStatus::Filled.to_string(),
                FormStatus::PhysicalSigned.to_string(),
            ]))
            .exec(&txn)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal menandatangani form: {e}")))?;

        // Galat di sini membatalkan transaksi beserta pembaruan di atas
        Self::load_mutable_submission(&txn, spj_id).await?;

        let form = SpjForms::find()
            .filter(spj_forms::Column::SpjId.eq(spj_id))
            .filter(spj_forms::Column::FormType.eq(form_type))
            .one(&txn)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal mengambil form: {e}")))?
            .ok_or_else(|| SuperjeError::not_found("Form tidak ditemukan"))?;

        if updated.rows_affected == 0 {
            let current = form
                .status
                .parse::<FormStatus>()
                .unwrap_or(FormStatus::Filled);
            return Err(match current {
                FormStatus::Signed => {
                    SuperjeError::precondition_failed("Form sudah ditandatangani")
                }
                FormStatus::Rejected => SuperjeError::precondition_failed(
                    "Form ditolak; perbaiki isian terlebih dahulu",
                ),
                FormStatus::Filled | FormStatus::PhysicalSigned => {
                    SuperjeError::conflict("Form sedang ditandatangani oleh proses lain")
                }
            });
        }

        match &decision {
            SignDecision::Approve => {
                let record = SignatureRecordActiveModel {
                    form_id: Set(form.id),
                    signer_id: Set(signer_id),
                    signature_data: Set("ELECTRONIC_SIGNATURE".to_string()),
                    signed_at: Set(chrono::Utc::now().timestamp()),
                    ..Default::default()
                };
                record.insert(&txn).await.map_err(|e| {
                    SuperjeError::database_operation(format!("Gagal mencatat tanda tangan: {e}"))
                })?;

                Self::append_log(&txn, spj_id, signer_id, &format!("sign_form_{form_type}"))
                    .await?;
            }
            SignDecision::Reject { .. } => {
                Self::append_log(&txn, spj_id, signer_id, &format!("reject_form_{form_type}"))
                    .await?;
            }
        }

        txn.commit()
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal menyimpan transaksi: {e}")))?;

        Ok(SignFormResult {
            status: new_status,
            notes,
        })
    }

    /// Draf form 1-3 untuk dicetak dan ditandatangani basah
    pub async fn get_draft_form_impl(&self, spj_id: i64, form_type: i32) -> Result<DraftForm> {
        if !(1..=DRAFT_FORM_MAX).contains(&form_type) {
            return Err(SuperjeError::precondition_failed(format!(
                "Draf hanya tersedia untuk form 1 sampai {DRAFT_FORM_MAX}"
            )));
        }

        let submission = SpjSubmissions::find_by_id(spj_id)
            .one(&self.db)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal mengambil SPJ: {e}")))?
            .ok_or_else(|| SuperjeError::not_found("SPJ tidak ditemukan"))?;

        let form = SpjForms::find()
            .filter(spj_forms::Column::SpjId.eq(spj_id))
            .filter(spj_forms::Column::FormType.eq(form_type))
            .one(&self.db)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal mengambil form: {e}")))?
            .ok_or_else(|| SuperjeError::not_found("Form tidak ditemukan"))?;

        Ok(DraftForm {
            form_data: form.data,
            metadata: submission.into_metadata(),
        })
    }
}
