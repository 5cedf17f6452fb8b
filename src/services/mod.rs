pub mod activity_logs;
pub mod auth;
pub mod spj;
pub mod users;

pub use activity_logs::ActivityLogService;
pub use auth::AuthService;
pub use spj::SpjService;
pub use users::UserService;

use actix_web::HttpResponse;

use crate::errors::SuperjeError;
use crate::models::{ApiResponse, ErrorCode};

/// Memetakan error lapisan storage ke respons HTTP beramplop seragam.
///
/// Taksonomi: Authorization -> 403, NotFound -> 404, PreconditionFailed -> 422,
/// Conflict -> 409, Validation -> 400, Authentication -> 401, selainnya 500.
pub(crate) fn storage_error_response(err: &SuperjeError) -> HttpResponse {
    match err {
        SuperjeError::Authorization(msg) => {
            HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, msg))
        }
        SuperjeError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, msg))
        }
        SuperjeError::PreconditionFailed(msg) => HttpResponse::UnprocessableEntity()
            .json(ApiResponse::error_empty(ErrorCode::PreconditionFailed, msg)),
        SuperjeError::Conflict(msg) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(ErrorCode::Conflict, msg))
        }
        SuperjeError::Validation(msg) => {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::ValidationError, msg))
        }
        SuperjeError::Authentication(msg) => {
            HttpResponse::Unauthorized().json(ApiResponse::error_empty(ErrorCode::AuthFailed, msg))
        }
        other => {
            tracing::error!("Storage error: {}", other);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Terjadi kesalahan internal",
            ))
        }
    }
}
