use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::spj::requests::CreateSpjRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

use super::SpjService;

pub async fn handle_create(
    service: &SpjService,
    create_request: CreateSpjRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Autentikasi diperlukan",
        )));
    };

    if user.role != UserRole::Operator {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Hanya operator yang dapat membuat pengajuan SPJ",
        )));
    }

    // Validasi masukan dasar
    if create_request.rup_id.trim().is_empty() || create_request.activity_name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "ID RUP dan nama kegiatan tidak boleh kosong",
        )));
    }

    if create_request.year < 2000 || create_request.year > 2100 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Tahun anggaran tidak valid",
        )));
    }

    match storage.create_spj_submission(user.id, create_request).await {
        Ok(submission) => {
            tracing::info!("SPJ {} created by operator {}", submission.id, user.id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(submission, "Pengajuan SPJ berhasil dibuat")))
        }
        Err(e) => Ok(storage_error_response(&e)),
    }
}
