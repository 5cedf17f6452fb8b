//! Model bisnis dan struktur permintaan/respons API

pub mod activity_logs;
pub mod auth;
pub mod common;
pub mod spj;
pub mod users;

pub use common::response::ApiResponse;

/// Kode error numerik pada amplop respons API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // umum
    BadRequest = 1000,
    Unauthorized = 1001,
    AuthFailed = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1005,
    PreconditionFailed = 1006,
    ValidationError = 1007,
    InternalServerError = 1500,

    // pengguna
    UserNotFound = 2001,
    UserAlreadyExists = 2002,

    // SPJ
    SpjNotFound = 3001,
    FormNotFound = 3002,
    NotAllFormsSigned = 3003,
    NotYetVerified = 3004,
    SpjNotCompleted = 3005,

    // berkas
    FileUploadFailed = 4001,
    FileTypeNotAllowed = 4002,
    FileSizeExceeded = 4003,
    MultifileUploadNotAllowed = 4004,
    FileNotFound = 4005,
}

/// Waktu mulai aplikasi, disimpan di app data
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
