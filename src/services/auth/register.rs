use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::users::requests::CreateUserRequest;
use crate::models::users::responses::UserSummary;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_nip, validate_password_simple};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    mut create_request: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. Validasi masukan
    if create_request.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Nama tidak boleh kosong",
        )));
    }

    if let Err(msg) = validate_email(&create_request.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }

    if let Some(ref nip) = create_request.nip
        && !nip.is_empty()
        && let Err(msg) = validate_nip(nip)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }

    if let Err(msg) = validate_password_simple(&create_request.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }

    // 2. Email harus unik
    match storage.get_user_by_email(&create_request.email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "Email sudah terdaftar",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Failed to check existing user: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Pendaftaran gagal",
                )),
            );
        }
    }

    // 3. Simpan hash, bukan kata sandi mentah
    match hash_password(&create_request.password) {
        Ok(hash) => create_request.password = hash,
        Err(e) => {
            tracing::error!("Failed to hash password: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Pendaftaran gagal",
                )),
            );
        }
    }

    match storage.create_user(create_request).await {
        Ok(user) => {
            tracing::info!("User {} registered with role {}", user.email, user.role);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                UserSummary::from(user),
                "Pengguna berhasil didaftarkan",
            )))
        }
        Err(e) => {
            tracing::error!("Failed to create user: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Pendaftaran gagal",
                )),
            )
        }
    }
}
