//! Room store subsystem.
//!
//! # Data Flow
//! ```text
//! Resource handler (http/handlers.rs)
//!     → types.rs (RoomKey = resource + room id)
//!     → room_store.rs (put / get / take)
//!     → in-memory map, shared by every request
//! ```
//!
//! # Design Decisions
//! - One payload per key; `put` is last-write-wins
//! - `take` is an atomic get-and-remove; concurrent takes never both succeed
//! - Volatile: nothing survives a restart, nothing expires
//! - Constructed explicitly and injected, never a module-level global

pub mod room_store;
pub mod types;

pub use room_store::RoomStore;
pub use types::{Resource, RoomKey};
