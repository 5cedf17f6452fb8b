//! Penangan error ekstraktor parameter (JSON body dan query string)
//!
//! Mengubah error deserialisasi bawaan actix menjadi amplop ApiResponse
//! agar klien selalu menerima bentuk respons yang sama.

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};

use crate::models::{ApiResponse, ErrorCode};

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let detail = err.to_string();
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Badan permintaan JSON tidak valid: {detail}"),
    ));
    InternalError::from_response(err, response).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    let detail = err.to_string();
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Parameter query tidak valid: {detail}"),
    ));
    InternalError::from_response(err, response).into()
}
