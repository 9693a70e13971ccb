//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store the compiled route table
//! - Resolve (method, path) to the action a handler should perform
//! - Return explicit rejections (not found, method not allowed)
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Health checks resolved before resource routes
//! - Unknown path shape or prefix is not-found whatever the verb

use axum::http::Method;

use crate::config::SignallingConfig;
use crate::routing::matcher::{split_segments, HealthMatcher, PathRejection, ResourceMatcher};
use crate::store::{Resource, RoomKey};

/// Store operation a resource route performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Put,
    Get,
    Take,
}

/// What the HTTP layer should do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Health { room: Option<String> },
    Put(RoomKey),
    Get(RoomKey),
    Take(RoomKey),
    MethodNotAllowed { allow: String },
    NotFound(PathRejection),
}

impl Action {
    /// Stable name for metrics labels.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Health { .. } => "health",
            Action::Put(key) => match key.resource {
                Resource::Offer => "put_offer",
                Resource::Answer => "put_answer",
            },
            Action::Get(key) => match key.resource {
                Resource::Offer => "get_offer",
                Resource::Answer => "get_answer",
            },
            Action::Take(key) => match key.resource {
                Resource::Offer => "take_offer",
                Resource::Answer => "take_answer",
            },
            Action::MethodNotAllowed { .. } => "method_not_allowed",
            Action::NotFound(_) => "not_found",
        }
    }
}

#[derive(Debug, Clone)]
struct ResourceRoute {
    method: Method,
    resource: Resource,
    op: StoreOp,
}

/// Ordered route table built once from configuration.
#[derive(Debug, Clone)]
pub struct RouteTable {
    health: HealthMatcher,
    resources: ResourceMatcher,
    routes: Vec<ResourceRoute>,
}

impl RouteTable {
    /// Compile the table for the configured prefix and verbs.
    pub fn from_config(config: &SignallingConfig) -> Self {
        let mut routes = vec![
            ResourceRoute {
                method: Method::GET,
                resource: Resource::Offer,
                op: StoreOp::Get,
            },
            ResourceRoute {
                method: Method::PUT,
                resource: Resource::Offer,
                op: StoreOp::Put,
            },
        ];
        if config.allow_offer_delete {
            routes.push(ResourceRoute {
                method: Method::DELETE,
                resource: Resource::Offer,
                op: StoreOp::Take,
            });
        }
        routes.push(ResourceRoute {
            method: Method::PUT,
            resource: Resource::Answer,
            op: StoreOp::Put,
        });
        routes.push(ResourceRoute {
            method: Method::DELETE,
            resource: Resource::Answer,
            op: StoreOp::Take,
        });

        tracing::debug!(
            prefix = %config.prefix,
            routes = routes.len(),
            "Route table compiled"
        );

        Self {
            health: HealthMatcher::new(config.prefix.clone()),
            resources: ResourceMatcher::new(config.prefix.clone()),
            routes,
        }
    }

    /// Resolve a request to an action. Never touches the store.
    pub fn resolve(&self, method: &Method, path: &str) -> Action {
        let segments = split_segments(path);

        if method == Method::GET {
            if let Some(room) = self.health.matches(&segments) {
                return Action::Health { room };
            }
        }

        let key = match self.resources.matches(&segments) {
            Ok(key) => key,
            Err(rejection) => return Action::NotFound(rejection),
        };

        let route = self
            .routes
            .iter()
            .find(|r| r.resource == key.resource && r.method == method);

        match route.map(|r| r.op) {
            Some(StoreOp::Put) => Action::Put(key),
            Some(StoreOp::Get) => Action::Get(key),
            Some(StoreOp::Take) => Action::Take(key),
            None => Action::MethodNotAllowed {
                allow: self.allowed_methods(key.resource),
            },
        }
    }

    /// Value of the `Allow` header for a resource, e.g. `"GET, PUT"`.
    pub fn allowed_methods(&self, resource: Resource) -> String {
        self.routes
            .iter()
            .filter(|r| r.resource == resource)
            .map(|r| r.method.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
