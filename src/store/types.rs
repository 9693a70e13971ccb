//! Key types for the room store.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The two kinds of payload a room can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Offer,
    Answer,
}

impl Resource {
    /// Path segment naming this resource.
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Offer => "offer",
            Resource::Answer => "answer",
        }
    }

    /// Capitalized name for error details ("Offer not found").
    pub fn title(&self) -> &'static str {
        match self {
            Resource::Offer => "Offer",
            Resource::Answer => "Answer",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown resource '{0}'")]
pub struct UnknownResource(pub String);

impl FromStr for Resource {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "offer" => Ok(Resource::Offer),
            "answer" => Ok(Resource::Answer),
            other => Err(UnknownResource(other.to_string())),
        }
    }
}

/// Composite store key. Room ids are opaque caller-chosen strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomKey {
    pub resource: Resource,
    pub room_id: String,
}

impl RoomKey {
    pub fn new(resource: Resource, room_id: impl Into<String>) -> Self {
        Self {
            resource,
            room_id: room_id.into(),
        }
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource, self.room_id)
    }
}
