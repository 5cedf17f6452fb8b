use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::services::storage_error_response;

use super::ActivityLogService;

/// Daftar log aktivitas; pembatasan peran PA dilakukan di rute
pub async fn handle_list(
    service: &ActivityLogService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_activity_logs().await {
        Ok(logs) => Ok(HttpResponse::Ok().json(ApiResponse::success(logs, "OK"))),
        Err(e) => Ok(storage_error_response(&e)),
    }
}
