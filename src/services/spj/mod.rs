pub mod create;
pub mod export;
pub mod form;
pub mod list;
pub mod upload;
pub mod verify;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::spj::requests::{
    CreateSpjRequest, FinalizeSpjRequest, SignFormRequest, SubmitVerificationRequest,
};
use crate::storage::Storage;

/// Layanan alur kerja SPJ: pengajuan, form, tanda tangan, verifikasi, unduhan
pub struct SpjService {
    storage: Option<Arc<dyn Storage>>,
}

impl SpjService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // Membuat pengajuan SPJ baru (OPERATOR)
    pub async fn create(
        &self,
        create_request: CreateSpjRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create(self, create_request, request).await
    }

    // Daftar pengajuan sesuai peran
    pub async fn list(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::handle_list(self, request).await
    }

    // Detail pengajuan beserta form dan lembar verifikasi
    pub async fn get_detail(&self, spj_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::handle_get_detail(self, spj_id, request).await
    }

    // Mengganti isi satu form (OPERATOR pemilik)
    pub async fn update_form(
        &self,
        spj_id: i64,
        form_type: i32,
        data: serde_json::Value,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        form::handle_update_form(self, spj_id, form_type, data, request).await
    }

    // Mengunggah pindaian tanda tangan basah (OPERATOR pemilik)
    pub async fn upload_scan(
        &self,
        spj_id: i64,
        form_type: i32,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload_scan(self, spj_id, form_type, request, payload).await
    }

    // Menandatangani atau menolak form (peran sesuai matriks)
    pub async fn sign_form(
        &self,
        spj_id: i64,
        form_type: i32,
        sign_request: SignFormRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        form::handle_sign_form(self, spj_id, form_type, sign_request, request).await
    }

    // Draf form 1-3 sebagai XLSX untuk dicetak dan ditandatangani basah
    pub async fn download_draft(
        &self,
        spj_id: i64,
        form_type: i32,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        export::handle_download_draft(self, spj_id, form_type, request).await
    }

    // Verifikasi tahap pertama (PENGURUS_BARANG)
    pub async fn verify(
        &self,
        spj_id: i64,
        verify_request: SubmitVerificationRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        verify::handle_verify(self, spj_id, verify_request, request).await
    }

    // Verifikasi akhir (PPK_KEUANGAN)
    pub async fn finalize(
        &self,
        spj_id: i64,
        finalize_request: FinalizeSpjRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        verify::handle_finalize(self, spj_id, finalize_request, request).await
    }

    // Unduh dokumen SPJ lengkap sebagai XLSX (hanya SPJ completed)
    pub async fn download(&self, spj_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        export::handle_download(self, spj_id, request).await
    }
}
