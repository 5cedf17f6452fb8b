use super::SeaOrmStorage;
use crate::entity::prelude::{
    SpjFormActiveModel, SpjForms, SpjSubmissionActiveModel, SpjSubmissions, Users,
    VerificationSheets,
};
use crate::entity::{spj_forms, spj_submissions, verification_sheets};
use crate::errors::{Result, SuperjeError};
use crate::models::spj::{
    entities::{FORM_COUNT, FormStatus, SpjSubmission},
    requests::CreateSpjRequest,
    responses::{SpjWithRelations, VerificationSheetDetail},
};
use crate::models::users::responses::UserSummary;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// Membuat pengajuan SPJ baru beserta 11 form kosong dalam satu transaksi.
    /// Bila salah satu sisipan gagal, tidak ada baris yang tersimpan.
    pub async fn create_spj_submission_impl(
        &self,
        operator_id: i64,
        req: CreateSpjRequest,
    ) -> Result<SpjSubmission> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal memulai transaksi: {e}")))?;

        let submission = SpjSubmissionActiveModel {
            rup_id: Set(req.rup_id),
            year: Set(req.year),
            activity_name: Set(req.activity_name),
            activity: Set(req.activity),
            status: Set("draft".to_string()),
            operator_id: Set(operator_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = submission
            .insert(&txn)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal membuat pengajuan SPJ: {e}")))?;

        // 11 form kosong, semua berstatus filled
        for form_type in 1..=FORM_COUNT {
            let form = SpjFormActiveModel {
                spj_id: Set(inserted.id),
                form_type: Set(form_type),
                data: Set(serde_json::json!({})),
                status: Set(FormStatus::Filled.to_string()),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            form.insert(&txn)
                .await
                .map_err(|e| SuperjeError::database_operation(format!("Gagal membuat form {form_type}: {e}")))?;
        }

        Self::append_log(&txn, inserted.id, operator_id, "submit").await?;

        txn.commit()
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal menyimpan transaksi: {e}")))?;

        Ok(inserted.into_submission())
    }

    /// Daftar pengajuan, terbaru dulu; `owner_filter` membatasi ke satu operator
    pub async fn list_spj_submissions_impl(
        &self,
        owner_filter: Option<i64>,
    ) -> Result<Vec<SpjSubmission>> {
        let mut select = SpjSubmissions::find();

        if let Some(operator_id) = owner_filter {
            select = select.filter(spj_submissions::Column::OperatorId.eq(operator_id));
        }

        let rows = select
            .order_by_desc(spj_submissions::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal mengambil daftar SPJ: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_submission()).collect())
    }

    /// Mengambil pengajuan saja
    pub async fn get_spj_by_id_impl(&self, spj_id: i64) -> Result<Option<SpjSubmission>> {
        let result = SpjSubmissions::find_by_id(spj_id)
            .one(&self.db)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal mengambil SPJ: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// Mengambil pengajuan beserta form (urut tipe), operator, dan lembar verifikasi
    pub async fn get_spj_with_relations_impl(
        &self,
        spj_id: i64,
    ) -> Result<Option<SpjWithRelations>> {
        let Some(submission) = SpjSubmissions::find_by_id(spj_id)
            .one(&self.db)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal mengambil SPJ: {e}")))?
        else {
            return Ok(None);
        };

        let operator = Users::find_by_id(submission.operator_id)
            .one(&self.db)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal mengambil operator: {e}")))?
            .ok_or_else(|| SuperjeError::not_found("Operator pengajuan tidak ditemukan"))?;

        let forms = SpjForms::find()
            .filter(spj_forms::Column::SpjId.eq(spj_id))
            .order_by_asc(spj_forms::Column::FormType)
            .all(&self.db)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal mengambil form: {e}")))?;

        let sheet = VerificationSheets::find()
            .filter(verification_sheets::Column::SpjId.eq(spj_id))
            .one(&self.db)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal mengambil lembar verifikasi: {e}")))?;

        let verification = match sheet {
            Some(sheet) => {
                let validator = match sheet.validator_id {
                    Some(id) => self
                        .get_user_by_id_impl(id)
                        .await?
                        .map(UserSummary::from),
                    None => None,
                };
                let verifier = match sheet.verifier_id {
                    Some(id) => self
                        .get_user_by_id_impl(id)
                        .await?
                        .map(UserSummary::from),
                    None => None,
                };
                Some(VerificationSheetDetail {
                    sheet: sheet.into_sheet(),
                    validator,
                    verifier,
                })
            }
            None => None,
        };

        Ok(Some(SpjWithRelations {
            submission: submission.into_submission(),
            forms: forms.into_iter().map(|m| m.into_form()).collect(),
            operator: UserSummary::from(operator.into_user()),
            verification,
        }))
    }
}
