use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs;
use std::io::Write;
use std::{fs::File, path::Path};
use uuid::Uuid;

use super::SpjService;
use crate::config::AppConfig;
use crate::errors::SuperjeError;
use crate::middlewares::RequireJWT;
use crate::models::spj::entities::ScanFileType;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::utils::validate_magic_bytes;

/// Mengunggah pindaian tanda tangan basah untuk satu form.
/// Bidang multipart yang dibaca bernama `scan`; satu berkas per permintaan.
pub async fn handle_upload_scan(
    service: &SpjService,
    spj_id: i64,
    form_type: i32,
    request: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;
    let max_size = config.upload.max_size;
    let allowed_types = &config.upload.allowed_types;

    let Some(user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
            ErrorCode::Unauthorized,
            "Autentikasi diperlukan",
        )));
    };

    if user.role != UserRole::Operator {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error_empty(
            ErrorCode::Forbidden,
            "Hanya operator yang dapat mengunggah pindaian",
        )));
    }

    // Pastikan direktori unggahan ada
    if !Path::new(upload_dir).exists()
        && let Err(e) = fs::create_dir_all(upload_dir)
    {
        tracing::error!("{}", SuperjeError::file_operation(format!("{e}")));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::FileUploadFailed,
                "Gagal membuat direktori unggahan",
            )),
        );
    }

    let mut file_uploaded = false;
    let mut stored_name = String::new();
    let mut extension = String::new();

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name == "scan" {
            if file_uploaded {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::MultifileUploadNotAllowed,
                    "Hanya satu berkas per unggahan",
                )));
            }
            file_uploaded = true;

            let original_name = content_disposition
                .and_then(|cd| cd.get_filename())
                .map(|s| s.to_string())
                .unwrap_or_default();

            // Ekstraksi dan validasi ekstensi
            extension = Path::new(&original_name)
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| format!(".{}", ext.to_lowercase()))
                .unwrap_or_default();

            if !allowed_types.iter().any(|t| t.to_lowercase() == extension) {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileTypeNotAllowed,
                    "Jenis berkas tidak diizinkan; gunakan PDF atau Excel",
                )));
            }

            stored_name = format!(
                "{}-{}{}",
                chrono::Utc::now().timestamp(),
                Uuid::new_v4(),
                extension
            );
            let file_path = format!("{upload_dir}/{stored_name}");
            let mut f = match File::create(&file_path) {
                Ok(file) => file,
                Err(e) => {
                    tracing::error!("{}", SuperjeError::file_operation(format!("{e}")));
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::<()>::error_empty(
                            ErrorCode::FileUploadFailed,
                            "Gagal menyimpan berkas",
                        ),
                    ));
                }
            };

            let mut total_size: usize = 0;
            let mut first_chunk = true;
            while let Some(chunk) = field.next().await {
                let data = chunk?;

                // Periksa magic bytes pada potongan pertama
                if first_chunk {
                    first_chunk = false;
                    if !validate_magic_bytes(&data, &extension) {
                        let _ = fs::remove_file(&file_path);
                        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                            ErrorCode::FileTypeNotAllowed,
                            "Isi berkas tidak sesuai dengan ekstensinya",
                        )));
                    }
                }

                total_size += data.len();
                if total_size > max_size {
                    let _ = fs::remove_file(&file_path);
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::FileSizeExceeded,
                        "Ukuran berkas melebihi batas",
                    )));
                }
                f.write_all(&data)?;
            }
        }
    }

    if !file_uploaded {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "Bidang 'scan' tidak ditemukan pada unggahan",
        )));
    }

    let file_type = if extension == ".pdf" {
        ScanFileType::Pdf
    } else {
        ScanFileType::Excel
    };
    let scan_url = format!("/uploads/{stored_name}");

    let storage = service.get_storage(request);
    match storage
        .set_form_scan(spj_id, form_type, &scan_url, file_type, user.id)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            serde_json::json!({ "scan_url": scan_url }),
            "Pindaian berhasil diunggah",
        ))),
        Err(e) => {
            // Baris form gagal diperbarui; berkas yatim dibersihkan
            let _ = fs::remove_file(format!("{upload_dir}/{stored_name}"));
            Ok(storage_error_response(&e))
        }
    }
}
