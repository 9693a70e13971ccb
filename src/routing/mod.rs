//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → matcher.rs (split path, classify against the grammar)
//!     → router.rs (ordered route table lookup)
//!     → Return: Action (store operation, health check, or rejection)
//!
//! Route Compilation (at startup):
//!     SignallingConfig
//!     → Prefix literal + allowed verbs per resource
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Health checks are matched before resource routes
//! - Path shape and prefix are checked before the verb
//! - First match wins

pub mod matcher;
pub mod router;

pub use matcher::{decode_room_id, split_segments, HealthMatcher, PathRejection, ResourceMatcher};
pub use router::{Action, RouteTable};
