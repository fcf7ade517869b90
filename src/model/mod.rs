//! # Domain Models
//!
//! Pure data records exchanged with the backend and stored in the session
//! context. These types carry no behavior beyond (de)serialization; all
//! state handling lives in the [`session`](crate::session) module.

pub mod menu;
pub mod order;
pub mod user;

pub use menu::MenuItem;
pub use order::{OrderItem, OrderRecord};
pub use user::{AuthUser, Credentials, RequestorIdentity, SignupAck, SignupProfile};
