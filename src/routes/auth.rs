use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::requests::{LoginRequest, RefreshTokenRequest, UpdatePasswordRequest};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::services::AuthService;

// Instans AuthService global yang dimuat malas
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn login(
    req: HttpRequest,
    user_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(user_data.into_inner(), &req).await
}

pub async fn refresh_token(
    req: HttpRequest,
    token_data: web::Json<RefreshTokenRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .refresh_token(token_data.into_inner(), &req)
        .await
}

pub async fn register(
    req: HttpRequest,
    user_data: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(user_data.into_inner(), &req).await
}

pub async fn get_current_user(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.get_current_user(&request).await
}

pub async fn update_password(
    req: HttpRequest,
    update_data: web::Json<UpdatePasswordRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .update_password(update_data.into_inner(), &req)
        .await
}

// Konfigurasi rute
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login))
            .route("/refresh", web::post().to(refresh_token))
            // Pendaftaran akun hanya oleh ADMIN
            .service(
                web::scope("/register")
                    .wrap(middlewares::RequireRole::new(&UserRole::Admin))
                    .wrap(middlewares::RequireJWT)
                    .route("", web::post().to(register)),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("/me", web::get().to(get_current_user))
                    .route("/password", web::put().to(update_password)),
            ),
    );
}
