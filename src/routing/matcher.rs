//! Path grammar matching.
//!
//! # Responsibilities
//! - Split a request path into non-empty segments
//! - Recognize the health check shapes
//! - Recognize `/<prefix>/<room_id>/<resource>` and explain rejections
//!
//! # Design Decisions
//! - Repeated and trailing slashes are ignored
//! - Segments are compared exactly (case-sensitive)
//! - Room ids are percent-decoded; no other validation
//! - Prefix and resource segments are compared undecoded

use percent_encoding::percent_decode_str;
use thiserror::Error;

use crate::store::{Resource, RoomKey};

/// Why a path did not name a resource. The message is the error detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathRejection {
    #[error("Invalid path")]
    InvalidPath,

    #[error("Unknown prefix")]
    UnknownPrefix,

    #[error("Unknown resource")]
    UnknownResource,
}

/// Non-empty segments of `path`.
pub fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

/// Percent-decode a room id segment. Invalid UTF-8 is replaced, not rejected.
pub fn decode_room_id(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

/// Matches `/health`, `/<prefix>/health` and `/<prefix>/<room_id>/health`.
#[derive(Debug, Clone)]
pub struct HealthMatcher {
    prefix: String,
}

impl HealthMatcher {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// `Some(room)` when the segments form a health check; `room` is set
    /// only for the room-scoped form.
    pub fn matches(&self, segments: &[&str]) -> Option<Option<String>> {
        match segments {
            ["health"] => Some(None),
            [prefix, "health"] if *prefix == self.prefix => Some(None),
            [prefix, room_id, "health"] if *prefix == self.prefix => {
                Some(Some(decode_room_id(room_id)))
            }
            _ => None,
        }
    }
}

/// Matches `/<prefix>/<room_id>/<offer|answer>`.
#[derive(Debug, Clone)]
pub struct ResourceMatcher {
    prefix: String,
}

impl ResourceMatcher {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn matches(&self, segments: &[&str]) -> Result<RoomKey, PathRejection> {
        let [prefix, room_id, resource] = segments else {
            return Err(PathRejection::InvalidPath);
        };
        if *prefix != self.prefix {
            return Err(PathRejection::UnknownPrefix);
        }
        let resource: Resource = resource
            .parse()
            .map_err(|_| PathRejection::UnknownResource)?;
        Ok(RoomKey::new(resource, decode_room_id(room_id)))
    }
}
