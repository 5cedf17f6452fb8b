use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::spj::requests::{
    CreateSpjRequest, FinalizeSpjRequest, SignFormRequest, SubmitVerificationRequest,
};
use crate::services::SpjService;

// Instans SpjService global yang dimuat malas
static SPJ_SERVICE: Lazy<SpjService> = Lazy::new(SpjService::new_lazy);

pub async fn create_spj(
    req: HttpRequest,
    spj_data: web::Json<CreateSpjRequest>,
) -> ActixResult<HttpResponse> {
    SPJ_SERVICE.create(spj_data.into_inner(), &req).await
}

pub async fn list_spj(request: HttpRequest) -> ActixResult<HttpResponse> {
    SPJ_SERVICE.list(&request).await
}

pub async fn get_spj(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    SPJ_SERVICE.get_detail(path.into_inner(), &req).await
}

pub async fn update_form(
    req: HttpRequest,
    path: web::Path<(i64, i32)>,
    data: web::Json<serde_json::Value>,
) -> ActixResult<HttpResponse> {
    let (spj_id, form_type) = path.into_inner();
    SPJ_SERVICE
        .update_form(spj_id, form_type, data.into_inner(), &req)
        .await
}

pub async fn upload_scan(
    req: HttpRequest,
    path: web::Path<(i64, i32)>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let (spj_id, form_type) = path.into_inner();
    SPJ_SERVICE.upload_scan(spj_id, form_type, &req, payload).await
}

pub async fn sign_form(
    req: HttpRequest,
    path: web::Path<(i64, i32)>,
    sign_data: web::Json<SignFormRequest>,
) -> ActixResult<HttpResponse> {
    let (spj_id, form_type) = path.into_inner();
    SPJ_SERVICE
        .sign_form(spj_id, form_type, sign_data.into_inner(), &req)
        .await
}

pub async fn download_draft(
    req: HttpRequest,
    path: web::Path<(i64, i32)>,
) -> ActixResult<HttpResponse> {
    let (spj_id, form_type) = path.into_inner();
    SPJ_SERVICE.download_draft(spj_id, form_type, &req).await
}

pub async fn verify_spj(
    req: HttpRequest,
    path: web::Path<i64>,
    verify_data: web::Json<SubmitVerificationRequest>,
) -> ActixResult<HttpResponse> {
    SPJ_SERVICE
        .verify(path.into_inner(), verify_data.into_inner(), &req)
        .await
}

pub async fn finalize_spj(
    req: HttpRequest,
    path: web::Path<i64>,
    finalize_data: web::Json<FinalizeSpjRequest>,
) -> ActixResult<HttpResponse> {
    SPJ_SERVICE
        .finalize(path.into_inner(), finalize_data.into_inner(), &req)
        .await
}

pub async fn download_spj(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    SPJ_SERVICE.download(path.into_inner(), &req).await
}

// Konfigurasi rute alur kerja SPJ; semuanya memerlukan autentikasi
pub fn configure_spj_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/spj")
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(create_spj))
            .route("", web::get().to(list_spj))
            .route("/{spj_id}", web::get().to(get_spj))
            .route("/{spj_id}/form/{form_type}", web::patch().to(update_form))
            .route(
                "/{spj_id}/form/{form_type}/upload-scan",
                web::post().to(upload_scan),
            )
            .route("/{spj_id}/form/{form_type}/sign", web::post().to(sign_form))
            .route(
                "/{spj_id}/form/{form_type}/download-draft",
                web::get().to(download_draft),
            )
            .route("/{spj_id}/verify", web::post().to(verify_spj))
            .route("/{spj_id}/finalize", web::post().to(finalize_spj))
            .route("/{spj_id}/download", web::get().to(download_spj)),
    );
}
