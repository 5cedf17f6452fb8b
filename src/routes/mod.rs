pub mod activity_logs;

pub mod auth;

pub mod spj;

pub mod users;

pub use activity_logs::configure_activity_log_routes;
pub use auth::configure_auth_routes;
pub use spj::configure_spj_routes;
pub use users::configure_user_routes;
