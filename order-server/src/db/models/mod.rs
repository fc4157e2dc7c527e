//! Database Models

pub mod notification;
pub mod order;
pub mod serde_helpers;
pub mod user;

pub use notification::Notification;
pub use order::{ORDER_TABLE, Order, OrderId, OrderView};
pub use user::{NewUser, User, UserId};
