//! Pengujian alur kerja SPJ menembus lapisan penyimpanan.
//!
//! Memakai SQLite dalam memori sehingga seluruh aturan transaksi (matriks
//! peran, transisi status, log aktivitas) teruji terhadap basis data nyata.

use serde_json::json;

use superje_backend::errors::SuperjeError;
use superje_backend::models::spj::entities::{
    FormStatus, ScanFileType, SignDecision, SpjStatus, required_signer_role,
};
use superje_backend::models::spj::requests::CreateSpjRequest;
use superje_backend::models::users::entities::{User, UserRole};
use superje_backend::models::users::requests::CreateUserRequest;
use superje_backend::storage::Storage;
use superje_backend::storage::sea_orm_storage::SeaOrmStorage;

async fn setup_storage() -> SeaOrmStorage {
    SeaOrmStorage::new_with_url(":memory:", 1, 5)
        .await
        .expect("failed to create in-memory storage")
}

async fn create_user(storage: &SeaOrmStorage, name: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            name: name.to_string(),
            email: format!("{}@instansi.go.id", name.to_lowercase().replace(' ', ".")),
            // lapisan storage menerima hash jadi; isinya tidak diverifikasi di sini
            password: "$argon2id$dummy".to_string(),
            role,
            nip: None,
        })
        .await
        .expect("failed to create user")
}

fn spj_request() -> CreateSpjRequest {
    CreateSpjRequest {
        rup_id: "RUP-2025-001".to_string(),
        year: 2025,
        activity_name: "Pengadaan ATK".to_string(),
        activity: "Belanja alat tulis kantor triwulan I".to_string(),
    }
}

/// Menandatangani form 1..=10 dengan peran yang sesuai matriks
async fn sign_all_verifiable_forms(
    storage: &SeaOrmStorage,
    spj_id: i64,
    signers: &[(&User, UserRole)],
) {
    for form_type in 1..=10 {
        let required = required_signer_role(form_type).unwrap();
        let (signer, _) = signers
            .iter()
            .find(|(_, role)| *role == required)
            .expect("missing signer for role");
        let result = storage
            .sign_spj_form(spj_id, form_type, signer.id, required, SignDecision::Approve)
            .await
            .expect("sign should succeed");
        assert_eq!(result.status, FormStatus::Signed);
    }
}

struct Workflow {
    storage: SeaOrmStorage,
    operator: User,
    ppk: User,
    pa: User,
    pptk: User,
    pengurus_barang: User,
    ppk_keuangan: User,
}

impl Workflow {
    async fn new() -> Self {
        let storage = setup_storage().await;
        let operator = create_user(&storage, "Operator Satu", UserRole::Operator).await;
        let ppk = create_user(&storage, "PPK Satu", UserRole::Ppk).await;
        let pa = create_user(&storage, "PA Satu", UserRole::Pa).await;
        let pptk = create_user(&storage, "PPTK Satu", UserRole::Pptk).await;
        let pengurus_barang =
            create_user(&storage, "Pengurus Barang", UserRole::PengurusBarang).await;
        let ppk_keuangan = create_user(&storage, "PPK Keuangan", UserRole::PpkKeuangan).await;

        Self {
            storage,
            operator,
            ppk,
            pa,
            pptk,
            pengurus_barang,
            ppk_keuangan,
        }
    }

    fn signers(&self) -> Vec<(&User, UserRole)> {
        vec![
            (&self.ppk, UserRole::Ppk),
            (&self.pa, UserRole::Pa),
            (&self.operator, UserRole::Operator),
            (&self.pptk, UserRole::Pptk),
            (&self.pengurus_barang, UserRole::PengurusBarang),
        ]
    }

    /// Membawa satu pengajuan baru sampai status verified
    async fn verified_submission(&self) -> i64 {
        let submission = self
            .storage
            .create_spj_submission(self.operator.id, spj_request())
            .await
            .unwrap();
        sign_all_verifiable_forms(&self.storage, submission.id, &self.signers()).await;
        self.storage
            .submit_verification(submission.id, self.pengurus_barang.id, true, None)
            .await
            .unwrap();
        submission.id
    }
}

#[tokio::test]
async fn create_submission_creates_eleven_forms_and_one_log() {
    let wf = Workflow::new().await;

    let submission = wf
        .storage
        .create_spj_submission(wf.operator.id, spj_request())
        .await
        .unwrap();
    assert_eq!(submission.status, SpjStatus::Draft);

    let detail = wf
        .storage
        .get_spj_with_relations(submission.id)
        .await
        .unwrap()
        .expect("submission should exist");
    assert_eq!(detail.forms.len(), 11);
    for (i, form) in detail.forms.iter().enumerate() {
        assert_eq!(form.form_type, (i + 1) as i32);
        assert_eq!(form.status, FormStatus::Filled);
    }
    assert_eq!(detail.operator.id, wf.operator.id);
    assert!(detail.verification.is_none());

    let logs = wf.storage.list_activity_logs().await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, "submit");
    assert_eq!(logs[0].user.id, wf.operator.id);
}

#[tokio::test]
async fn sign_with_wrong_role_is_rejected() {
    let wf = Workflow::new().await;
    let submission = wf
        .storage
        .create_spj_submission(wf.operator.id, spj_request())
        .await
        .unwrap();

    // Form 1 milik PPK, bukan PPTK
    let err = wf
        .storage
        .sign_spj_form(
            submission.id,
            1,
            wf.pptk.id,
            UserRole::Pptk,
            SignDecision::Approve,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SuperjeError::Authorization(_)));

    // Status form tidak berubah
    let detail = wf
        .storage
        .get_spj_with_relations(submission.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.forms[0].status, FormStatus::Filled);
}

#[tokio::test]
async fn sign_approve_records_signature_and_log() {
    let wf = Workflow::new().await;
    let submission = wf
        .storage
        .create_spj_submission(wf.operator.id, spj_request())
        .await
        .unwrap();

    let result = wf
        .storage
        .sign_spj_form(
            submission.id,
            1,
            wf.ppk.id,
            UserRole::Ppk,
            SignDecision::Approve,
        )
        .await
        .unwrap();
    assert_eq!(result.status, FormStatus::Signed);
    assert_eq!(result.notes, None);

    let logs = wf.storage.list_activity_logs().await.unwrap();
    assert!(logs.iter().any(|l| l.action == "sign_form_1"));

    // Tanda tangan ulang pada form yang sama ditolak
    let err = wf
        .storage
        .sign_spj_form(
            submission.id,
            1,
            wf.ppk.id,
            UserRole::Ppk,
            SignDecision::Approve,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SuperjeError::PreconditionFailed(_)));
}

#[tokio::test]
async fn concurrent_sign_yields_single_signature() {
    // Basis data berkas dengan pool lebih dari satu koneksi, supaya kedua
    // penandatangan benar-benar berjalan pada koneksi terpisah
    let db_path = std::env::temp_dir().join(format!(
        "superje-sign-race-{}.sqlite",
        uuid::Uuid::new_v4()
    ));
    let db_url = db_path.to_str().expect("temp path should be utf-8").to_string();
    let storage = SeaOrmStorage::new_with_url(&db_url, 5, 5)
        .await
        .expect("failed to create file-backed storage");

    let operator = create_user(&storage, "Operator Satu", UserRole::Operator).await;
    let ppk = create_user(&storage, "PPK Satu", UserRole::Ppk).await;
    let submission = storage
        .create_spj_submission(operator.id, spj_request())
        .await
        .unwrap();

    let first = storage.sign_spj_form(submission.id, 1, ppk.id, UserRole::Ppk, SignDecision::Approve);
    let second =
        storage.sign_spj_form(submission.id, 1, ppk.id, UserRole::Ppk, SignDecision::Approve);
    let (a, b) = tokio::join!(first, second);

    // Tepat satu yang menang; yang kalah mendapat galat konflik atau prasyarat
    assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
    let loser = if a.is_ok() { b.unwrap_err() } else { a.unwrap_err() };
    assert!(matches!(
        loser,
        SuperjeError::Conflict(_) | SuperjeError::PreconditionFailed(_)
    ));

    let detail = storage
        .get_spj_with_relations(submission.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.forms[0].status, FormStatus::Signed);

    // Catatan tanda tangan ditulis satu transaksi dengan log sign_form;
    // tepat satu entri berarti tepat satu tanda tangan tersimpan
    let logs = storage.list_activity_logs().await.unwrap();
    assert_eq!(logs.iter().filter(|l| l.action == "sign_form_1").count(), 1);

    drop(storage);
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{db_url}{suffix}"));
    }
}

#[tokio::test]
async fn reject_sets_notes_and_edit_recovers() {
    let wf = Workflow::new().await;
    let submission = wf
        .storage
        .create_spj_submission(wf.operator.id, spj_request())
        .await
        .unwrap();

    let result = wf
        .storage
        .sign_spj_form(
            submission.id,
            1,
            wf.ppk.id,
            UserRole::Ppk,
            SignDecision::Reject {
                reason: "Lampiran kurang".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(result.status, FormStatus::Rejected);
    assert_eq!(result.notes.as_deref(), Some("Lampiran kurang"));

    let logs = wf.storage.list_activity_logs().await.unwrap();
    assert!(logs.iter().any(|l| l.action == "reject_form_1"));
    assert!(!logs.iter().any(|l| l.action == "sign_form_1"));

    // Form yang ditolak tidak dapat langsung ditandatangani ulang
    let err = wf
        .storage
        .sign_spj_form(
            submission.id,
            1,
            wf.ppk.id,
            UserRole::Ppk,
            SignDecision::Approve,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SuperjeError::PreconditionFailed(_)));

    // Pengeditan mengembalikan status ke filled, lalu tanda tangan berhasil
    wf.storage
        .update_spj_form(
            submission.id,
            1,
            json!({ "uraian": "sudah diperbaiki" }),
            wf.operator.id,
        )
        .await
        .unwrap();

    let detail = wf
        .storage
        .get_spj_with_relations(submission.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.forms[0].status, FormStatus::Filled);

    let result = wf
        .storage
        .sign_spj_form(
            submission.id,
            1,
            wf.ppk.id,
            UserRole::Ppk,
            SignDecision::Approve,
        )
        .await
        .unwrap();
    assert_eq!(result.status, FormStatus::Signed);
}

#[tokio::test]
async fn update_form_requires_owner_operator() {
    let wf = Workflow::new().await;
    let other_operator = create_user(&wf.storage, "Operator Dua", UserRole::Operator).await;

    let submission = wf
        .storage
        .create_spj_submission(wf.operator.id, spj_request())
        .await
        .unwrap();

    let err = wf
        .storage
        .update_spj_form(submission.id, 1, json!({}), other_operator.id)
        .await
        .unwrap_err();
    assert!(matches!(err, SuperjeError::Authorization(_)));
}

#[tokio::test]
async fn update_form_round_trips_data() {
    let wf = Workflow::new().await;
    let submission = wf
        .storage
        .create_spj_submission(wf.operator.id, spj_request())
        .await
        .unwrap();

    let data = json!({
        "nomor": "001/SPJ/2025",
        "nilai": 1500000,
        "rincian": [{ "item": "kertas", "jumlah": 10 }],
    });
    wf.storage
        .update_spj_form(submission.id, 5, data.clone(), wf.operator.id)
        .await
        .unwrap();

    let detail = wf
        .storage
        .get_spj_with_relations(submission.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.forms[4].data, data);

    let logs = wf.storage.list_activity_logs().await.unwrap();
    assert!(logs.iter().any(|l| l.action == "update_form_5"));
}

#[tokio::test]
async fn upload_scan_marks_form_physical_signed() {
    let wf = Workflow::new().await;
    let submission = wf
        .storage
        .create_spj_submission(wf.operator.id, spj_request())
        .await
        .unwrap();

    wf.storage
        .set_form_scan(
            submission.id,
            2,
            "/uploads/scan-form2.pdf",
            ScanFileType::Pdf,
            wf.operator.id,
        )
        .await
        .unwrap();

    let detail = wf
        .storage
        .get_spj_with_relations(submission.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.forms[1].status, FormStatus::PhysicalSigned);
    assert_eq!(
        detail.forms[1].scan_url.as_deref(),
        Some("/uploads/scan-form2.pdf")
    );

    // Form dengan pindaian tetap dapat ditandatangani elektronik
    let result = wf
        .storage
        .sign_spj_form(
            submission.id,
            2,
            wf.ppk.id,
            UserRole::Ppk,
            SignDecision::Approve,
        )
        .await
        .unwrap();
    assert_eq!(result.status, FormStatus::Signed);

    let logs = wf.storage.list_activity_logs().await.unwrap();
    assert!(logs.iter().any(|l| l.action == "upload_scan_2"));
}

#[tokio::test]
async fn verification_requires_all_forms_signed() {
    let wf = Workflow::new().await;
    let submission = wf
        .storage
        .create_spj_submission(wf.operator.id, spj_request())
        .await
        .unwrap();

    let err = wf
        .storage
        .submit_verification(submission.id, wf.pengurus_barang.id, true, None)
        .await
        .unwrap_err();
    assert!(matches!(err, SuperjeError::PreconditionFailed(_)));
}

#[tokio::test]
async fn verification_requires_pengurus_barang() {
    let wf = Workflow::new().await;
    let submission = wf
        .storage
        .create_spj_submission(wf.operator.id, spj_request())
        .await
        .unwrap();
    sign_all_verifiable_forms(&wf.storage, submission.id, &wf.signers()).await;

    let err = wf
        .storage
        .submit_verification(submission.id, wf.ppk.id, true, None)
        .await
        .unwrap_err();
    assert!(matches!(err, SuperjeError::Authorization(_)));
}

#[tokio::test]
async fn verification_mirrors_into_form_eleven() {
    let wf = Workflow::new().await;
    let submission = wf
        .storage
        .create_spj_submission(wf.operator.id, spj_request())
        .await
        .unwrap();
    sign_all_verifiable_forms(&wf.storage, submission.id, &wf.signers()).await;

    let result = wf
        .storage
        .submit_verification(
            submission.id,
            wf.pengurus_barang.id,
            true,
            Some("Berkas lengkap".to_string()),
        )
        .await
        .unwrap();
    // Lembar verifikasi memakai kosakata valid/invalid, bukan status pengajuan
    assert_eq!(result.status, "valid");

    let detail = wf
        .storage
        .get_spj_with_relations(submission.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.submission.status, SpjStatus::Verified);

    // Form 11 mencerminkan hasil verifikasi
    let form_eleven = &detail.forms[10];
    assert_eq!(form_eleven.status, FormStatus::Filled);
    assert_eq!(
        form_eleven.data["validator_nama"],
        json!(wf.pengurus_barang.name)
    );
    assert_eq!(form_eleven.data["status_verifikasi"], json!("valid"));

    let verification = detail.verification.expect("sheet should exist");
    assert_eq!(verification.sheet.status, "valid");
    assert_eq!(
        verification.validator.map(|v| v.id),
        Some(wf.pengurus_barang.id)
    );

    let logs = wf.storage.list_activity_logs().await.unwrap();
    assert!(logs.iter().any(|l| l.action == "verify"));
}

#[tokio::test]
async fn invalid_verification_rejects_submission_terminally() {
    let wf = Workflow::new().await;
    let submission = wf
        .storage
        .create_spj_submission(wf.operator.id, spj_request())
        .await
        .unwrap();
    sign_all_verifiable_forms(&wf.storage, submission.id, &wf.signers()).await;

    let result = wf
        .storage
        .submit_verification(
            submission.id,
            wf.pengurus_barang.id,
            false,
            Some("Bukti belanja tidak sah".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(result.status, "invalid");

    let detail = wf
        .storage
        .get_spj_with_relations(submission.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.submission.status, SpjStatus::Rejected);
    assert_eq!(detail.verification.unwrap().sheet.status, "invalid");

    // Status terminal: tidak ada operasi tulis yang diterima lagi
    let err = wf
        .storage
        .update_spj_form(submission.id, 1, json!({}), wf.operator.id)
        .await
        .unwrap_err();
    assert!(matches!(err, SuperjeError::PreconditionFailed(_)));

    let err = wf
        .storage
        .finalize_spj(submission.id, wf.ppk_keuangan.id, true, None)
        .await
        .unwrap_err();
    assert!(matches!(err, SuperjeError::PreconditionFailed(_)));
}

#[tokio::test]
async fn finalize_requires_verified_status() {
    let wf = Workflow::new().await;
    let submission = wf
        .storage
        .create_spj_submission(wf.operator.id, spj_request())
        .await
        .unwrap();

    let err = wf
        .storage
        .finalize_spj(submission.id, wf.ppk_keuangan.id, true, None)
        .await
        .unwrap_err();
    assert!(matches!(err, SuperjeError::PreconditionFailed(_)));
}

#[tokio::test]
async fn finalize_completes_submission() {
    let wf = Workflow::new().await;
    let spj_id = wf.verified_submission().await;

    let result = wf
        .storage
        .finalize_spj(
            spj_id,
            wf.ppk_keuangan.id,
            true,
            Some("Disetujui".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(result.status, SpjStatus::Completed);

    let detail = wf
        .storage
        .get_spj_with_relations(spj_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.submission.status, SpjStatus::Completed);

    // Form 11 ditandatangani dan memuat hasil kedua tahap
    let form_eleven = &detail.forms[10];
    assert_eq!(form_eleven.status, FormStatus::Signed);
    assert_eq!(
        form_eleven.data["verifier_nama"],
        json!(wf.ppk_keuangan.name)
    );
    assert_eq!(form_eleven.data["status_final"], json!("completed"));

    let verification = detail.verification.unwrap();
    assert_eq!(verification.sheet.status, "completed");
    assert!(verification.sheet.signed_at.is_some());
    assert_eq!(
        verification.verifier.map(|v| v.id),
        Some(wf.ppk_keuangan.id)
    );

    // Finalisasi ulang ditolak karena sudah terminal
    let err = wf
        .storage
        .finalize_spj(spj_id, wf.ppk_keuangan.id, true, None)
        .await
        .unwrap_err();
    assert!(matches!(err, SuperjeError::PreconditionFailed(_)));
}

#[tokio::test]
async fn finalize_requires_ppk_keuangan() {
    let wf = Workflow::new().await;
    let spj_id = wf.verified_submission().await;

    let err = wf
        .storage
        .finalize_spj(spj_id, wf.pengurus_barang.id, true, None)
        .await
        .unwrap_err();
    assert!(matches!(err, SuperjeError::Authorization(_)));
}

#[tokio::test]
async fn draft_form_only_for_first_three() {
    let wf = Workflow::new().await;
    let submission = wf
        .storage
        .create_spj_submission(wf.operator.id, spj_request())
        .await
        .unwrap();

    let err = wf.storage.get_draft_form(submission.id, 4).await.unwrap_err();
    assert!(matches!(err, SuperjeError::PreconditionFailed(_)));

    let data = json!({ "nomor": "002" });
    wf.storage
        .update_spj_form(submission.id, 2, data.clone(), wf.operator.id)
        .await
        .unwrap();

    let draft = wf.storage.get_draft_form(submission.id, 2).await.unwrap();
    assert_eq!(draft.form_data, data);
    assert_eq!(draft.metadata.rup_id, "RUP-2025-001");
    assert_eq!(draft.metadata.status, SpjStatus::Draft);
}

#[tokio::test]
async fn list_scopes_to_owner_when_filtered() {
    let wf = Workflow::new().await;
    let other_operator = create_user(&wf.storage, "Operator Dua", UserRole::Operator).await;

    wf.storage
        .create_spj_submission(wf.operator.id, spj_request())
        .await
        .unwrap();
    wf.storage
        .create_spj_submission(other_operator.id, spj_request())
        .await
        .unwrap();

    let all = wf.storage.list_spj_submissions(None).await.unwrap();
    assert_eq!(all.len(), 2);

    let own = wf
        .storage
        .list_spj_submissions(Some(wf.operator.id))
        .await
        .unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].operator_id, wf.operator.id);
}

#[tokio::test]
async fn full_workflow_audit_trail() {
    let wf = Workflow::new().await;
    let spj_id = wf.verified_submission().await;
    wf.storage
        .finalize_spj(spj_id, wf.ppk_keuangan.id, true, None)
        .await
        .unwrap();
    wf.storage
        .log_activity(spj_id, wf.pa.id, "download")
        .await
        .unwrap();

    let logs = wf.storage.list_activity_logs().await.unwrap();

    // submit + 10 tanda tangan + verify + finalize + download
    assert_eq!(logs.len(), 14);
    assert_eq!(logs[0].action, "download");
    assert!(logs.iter().any(|l| l.action == "submit"));
    assert!(logs.iter().any(|l| l.action == "verify"));
    assert!(logs.iter().any(|l| l.action == "finalize"));
    for form_type in 1..=10 {
        assert!(
            logs.iter()
                .any(|l| l.action == format!("sign_form_{form_type}"))
        );
    }

    // Setiap entri memuat identitas pelaku dan ringkasan SPJ
    for log in &logs {
        assert!(!log.user.name.is_empty());
        assert_eq!(log.spj.rup_id, "RUP-2025-001");
    }
}

#[tokio::test]
async fn user_management_round_trip() {
    let wf = Workflow::new().await;

    assert_eq!(wf.storage.count_users().await.unwrap(), 6);

    let found = wf
        .storage
        .get_user_by_email(&wf.operator.email)
        .await
        .unwrap()
        .expect("operator should exist");
    assert_eq!(found.role, UserRole::Operator);

    let deleted = wf.storage.delete_user(wf.pa.id).await.unwrap();
    assert!(deleted);
    assert_eq!(wf.storage.count_users().await.unwrap(), 5);
    assert!(
        wf.storage
            .get_user_by_id(wf.pa.id)
            .await
            .unwrap()
            .is_none()
    );
}
