//! Data models
//!
//! Shared between order-server and frontend (via API).

pub mod notification;
pub mod order;
pub mod product;
pub mod status;
pub mod user;

// Re-exports
pub use notification::*;
pub use order::*;
pub use product::*;
pub use status::*;
pub use user::*;
