pub mod policy;
pub mod token;
pub mod tokener;

pub use policy::AccessPolicy;
pub use token::{Claims, TokenError, TokenService};
// Re-export from tokener.rs so we can do "use crate::auth::*;"
pub use tokener::{Auth, Tokener};
