//! Progress notifications for discovery and materialization runs.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::EddyEventHandler;
pub use types::*;
