use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::ActivityLogService;

// Instans ActivityLogService global yang dimuat malas
static ACTIVITY_LOG_SERVICE: Lazy<ActivityLogService> = Lazy::new(ActivityLogService::new_lazy);

pub async fn list_activity_logs(request: HttpRequest) -> ActixResult<HttpResponse> {
    ACTIVITY_LOG_SERVICE.list(&request).await
}

// Konfigurasi rute log aktivitas (hanya PA)
pub fn configure_activity_log_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/activity-logs")
            .wrap(middlewares::RequireRole::new(&UserRole::Pa))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_activity_logs)),
    );
}
