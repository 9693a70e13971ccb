//! WebRTC signalling relay library.
//!
//! Two peers exchange an offer and an answer through a room id over plain
//! HTTP; the relay only holds the most recent payload of each kind per room.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod store;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::{Shutdown, ShutdownSignal};
pub use store::RoomStore;
