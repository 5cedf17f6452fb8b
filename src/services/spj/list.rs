use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

use super::SpjService;

/// Daftar pengajuan: operator hanya melihat miliknya, peran lain melihat semua
pub async fn handle_list(service: &SpjService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Autentikasi diperlukan",
        )));
    };

    let owner_filter = if user.role == UserRole::Operator {
        Some(user.id)
    } else {
        None
    };

    match storage.list_spj_submissions(owner_filter).await {
        Ok(submissions) => Ok(HttpResponse::Ok().json(ApiResponse::success(submissions, "OK"))),
        Err(e) => Ok(storage_error_response(&e)),
    }
}

/// Detail pengajuan; operator hanya boleh melihat miliknya sendiri
pub async fn handle_get_detail(
    service: &SpjService,
    spj_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Autentikasi diperlukan",
        )));
    };

    match storage.get_spj_with_relations(spj_id).await {
        Ok(Some(detail)) => {
            if user.role == UserRole::Operator && detail.submission.operator_id != user.id {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "Anda tidak memiliki akses ke pengajuan ini",
                )));
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "OK")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SpjNotFound,
            "SPJ tidak ditemukan",
        ))),
        Err(e) => Ok(storage_error_response(&e)),
    }
}
