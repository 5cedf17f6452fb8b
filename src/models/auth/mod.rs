pub mod requests;
pub mod responses;

pub use requests::{LoginRequest, RefreshTokenRequest, UpdatePasswordRequest};
pub use responses::LoginResponse;
