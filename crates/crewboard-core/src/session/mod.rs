//! Session domain module.
//!
//! - `model`: `Identity` and the dashboard `Page` set
//! - `store`: the `SessionStore` state machine (logged out / worker / admin)

mod model;
mod store;

pub use model::{Identity, Page};
pub use store::SessionStore;
