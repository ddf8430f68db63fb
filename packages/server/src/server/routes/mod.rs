// HTTP routes
pub mod health;
pub mod hire;
pub mod notifications;

pub use health::*;
pub use hire::*;
pub use notifications::*;
