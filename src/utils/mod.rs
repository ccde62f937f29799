pub mod cookies;
pub mod elapsed;
pub mod http_helpers;
pub mod logger;
