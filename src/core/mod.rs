//! Router core: configuration, arbitration and composition.
//!
//! - `config`: [`RouterConfig`] with sentinel helpers;
//! - `slot`: [`ExclusiveSlot`], the single-occupant exclusive listener register;
//! - `router`: [`Router`], owning one bus and one slot.

mod config;
mod router;
mod slot;

pub use config::RouterConfig;
pub use router::Router;
pub use slot::ExclusiveSlot;
