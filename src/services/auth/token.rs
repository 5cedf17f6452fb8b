use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::auth::RefreshTokenRequest;
use crate::models::users::responses::UserSummary;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// Menerbitkan access token baru dari refresh token yang sah
pub async fn handle_refresh_token(
    service: &AuthService,
    refresh_request: RefreshTokenRequest,
    _request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    match JwtUtils::refresh_access_token(&refresh_request.refresh_token) {
        Ok(access_token) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            serde_json::json!({
                "access_token": access_token,
                "expires_in": config.jwt.access_token_expiry * 60,
            }),
            "Token diperbarui",
        ))),
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);
            Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::AuthFailed,
                "Refresh token tidak valid atau kedaluwarsa",
            )))
        }
    }
}

/// Data pengguna yang sedang login (dari ekstensi RequireJWT)
pub async fn handle_get_current_user(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_user(request) {
        Some(user) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(UserSummary::from(user), "OK"))),
        None => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Autentikasi diperlukan",
        ))),
    }
}
