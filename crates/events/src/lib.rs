//! In-process event distribution for record store mutations.

pub mod bus;

pub use bus::{EventBus, StoreEvent};
