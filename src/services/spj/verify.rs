use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::spj::requests::{FinalizeSpjRequest, SubmitVerificationRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

use super::SpjService;

/// Verifikasi tahap pertama oleh Pengurus Barang
pub async fn handle_verify(
    service: &SpjService,
    spj_id: i64,
    verify_request: SubmitVerificationRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Autentikasi diperlukan",
        )));
    };

    match storage
        .submit_verification(spj_id, user.id, verify_request.is_valid, verify_request.notes)
        .await
    {
        Ok(result) => {
            tracing::info!(
                "SPJ {} verified by user {} (result: {})",
                spj_id,
                user.id,
                result.status
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(result, "Verifikasi tersimpan")))
        }
        Err(e) => Ok(storage_error_response(&e)),
    }
}

/// Verifikasi akhir oleh PPK Keuangan
pub async fn handle_finalize(
    service: &SpjService,
    spj_id: i64,
    finalize_request: FinalizeSpjRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Autentikasi diperlukan",
        )));
    };

    match storage
        .finalize_spj(
            spj_id,
            user.id,
            finalize_request.is_final_valid,
            finalize_request.notes,
        )
        .await
    {
        Ok(result) => {
            tracing::info!(
                "SPJ {} finalized by user {} (result: {})",
                spj_id,
                user.id,
                result.status
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(result, "Finalisasi tersimpan")))
        }
        Err(e) => Ok(storage_error_response(&e)),
    }
}
