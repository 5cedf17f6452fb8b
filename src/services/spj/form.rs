use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::spj::entities::SignDecision;
use crate::models::spj::requests::SignFormRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

use super::SpjService;

/// Mengganti isi satu form secara utuh; status kembali ke `filled`
pub async fn handle_update_form(
    service: &SpjService,
    spj_id: i64,
    form_type: i32,
    data: serde_json::Value,
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
            "Hanya operator yang dapat mengubah isi form",
        )));
    }

    if !data.is_object() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Isi form harus berupa objek JSON",
        )));
    }

    match storage
        .update_spj_form(spj_id, form_type, data, user.id)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Form berhasil diperbarui"))),
        Err(e) => Ok(storage_error_response(&e)),
    }
}

/// Menandatangani atau menolak satu form.
/// `notes` terisi pada badan permintaan berarti penolakan.
pub async fn handle_sign_form(
    service: &SpjService,
    spj_id: i64,
    form_type: i32,
    sign_request: SignFormRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Autentikasi diperlukan",
        )));
    };

    let decision = SignDecision::from_notes(sign_request.notes);

    match storage
        .sign_spj_form(spj_id, form_type, user.id, user.role.clone(), decision)
        .await
    {
        Ok(result) => {
            tracing::info!(
                "Form {} of SPJ {} signed by user {} (result: {})",
                form_type,
                spj_id,
                user.id,
                result.status
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(result, "Keputusan tersimpan")))
        }
        Err(e) => Ok(storage_error_response(&e)),
    }
}
