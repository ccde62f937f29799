//! Request middleware: access logging wraps auth, auth wraps the routes.

pub mod auth;
pub mod request_logger;

pub use auth::jwt_auth;
pub use request_logger::log_requests;
