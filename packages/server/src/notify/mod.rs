//! Real-time notification layer: session registry + hire-event fan-out.

pub mod dispatcher;
pub mod registry;

pub use dispatcher::NotificationDispatcher;
pub use registry::{SessionId, SessionRegistry};
