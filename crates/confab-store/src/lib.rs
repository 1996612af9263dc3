//! # confab-store
//!
//! Document-store backing for the Confab client: typed collections for
//! user profiles, todos, and per-conversation message logs, plus live
//! snapshot subscriptions over the message logs.
//!
//! The crate exposes a cloneable [`Store`] handle with async typed CRUD
//! helpers for every domain model, split across one file per model. A
//! message log delivers the *entire* current ordered set to every live
//! subscriber on each change; subscribers never merge deltas.

pub mod messages;
pub mod models;
pub mod store;
pub mod subscription;
pub mod todos;
pub mod users;

mod error;

pub use error::StoreError;
pub use models::*;
pub use store::Store;
pub use subscription::{MessageSubscription, SubscriptionState};
