use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
};
use crate::utils::password::verify_password;

use super::AuthService;

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    // 1. Cari pengguna berdasarkan email
    match storage.get_user_by_email(&login_request.email).await {
        Ok(Some(user)) => {
            // 2. Verifikasi kata sandi
            if verify_password(&login_request.password, &user.password_hash) {
                // 3. Terbitkan pasangan token
                match user.generate_token_pair() {
                    Ok(token_pair) => {
                        tracing::info!("User {} logged in successfully", user.email);

                        let response = LoginResponse {
                            access_token: token_pair.access_token,
                            refresh_token: token_pair.refresh_token,
                            expires_in: config.jwt.access_token_expiry * 60, // menit -> detik
                            user,
                            created_at: chrono::Utc::now(),
                        };

                        Ok(HttpResponse::Ok()
                            .json(ApiResponse::success(response, "Login berhasil")))
                    }
                    Err(e) => {
                        tracing::error!("Failed to generate JWT token: {}", e);
                        Ok(
                            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                                ErrorCode::InternalServerError,
                                "Login gagal, tidak dapat menerbitkan token",
                            )),
                        )
                    }
                }
            } else {
                Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                    ErrorCode::AuthFailed,
                    "Email atau kata sandi salah",
                )))
            }
        }
        Ok(None) => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "Email atau kata sandi salah",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Login gagal: {e}"),
            )),
        ),
    }
}
