pub mod identity;
pub mod message;
pub mod smoker;

pub use identity::Identity;
pub use message::MessageResponse;
pub use smoker::{Smoker, SmokerUpdate};
