//! Train routes built on the arena-backed [`List`](crate::List).
//!
//! Two topologies share the same storage:
//! - [`LinearRoute`] stops at the ghost boundary in both directions;
//! - [`CircularRoute`] steps over the ghost node, so the last station is
//!   followed by the first one and vice versa.
//!
//! Both implement [`Route`], the small capability interface a
//! [`TrainCursor`] navigates through. The cursor never asks which topology
//! it is walking.

use thiserror::Error;

use crate::list::{Handle, ListError};

pub use circular::CircularRoute;
pub use cursor::TrainCursor;
pub use linear::LinearRoute;

mod circular;
mod cursor;
mod linear;

/// A stop on a route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    name: String,
    minutes_to_next: u32,
}

impl Station {
    pub fn new(name: impl Into<String>, minutes_to_next: u32) -> Self {
        Self {
            name: name.into(),
            minutes_to_next,
        }
    }

    /// A station with no onward travel time, e.g. the end of a line.
    pub fn terminal(name: impl Into<String>) -> Self {
        Self::new(name, 0)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Travel time to the next station in forward order. It plays no part
    /// when moving backward.
    pub fn minutes_to_next(&self) -> u32 {
        self.minutes_to_next
    }

    pub fn set_minutes_to_next(&mut self, minutes: u32) {
        self.minutes_to_next = minutes;
    }

    /// Returns `true` if this station is called `name`, ignoring case.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Recoverable outcomes of route and cursor operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("station handle is stale")]
    StaleHandle,
    #[error("station not found: {0}")]
    StationNotFound(String),
    #[error("station {0} is unreachable from the current position")]
    Unreachable(String),
    #[error("cursor has no position, the route is empty")]
    NoPosition,
}

impl From<ListError> for RouteError {
    fn from(err: ListError) -> Self {
        match err {
            ListError::StaleHandle => RouteError::StaleHandle,
        }
    }
}

/// What a [`TrainCursor`] needs from a route.
pub trait Route {
    /// Number of stations.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The first station, where cursors start by default.
    fn front(&self) -> Option<Handle>;

    fn station(&self, at: Handle) -> Option<&Station>;

    /// First station named `name`, ignoring case, scanning forward from the
    /// front. Visits each station at most once.
    fn find(&self, name: &str) -> Option<Handle>;

    /// The station after `at`, or `None` at a boundary.
    fn step_forward(&self, at: Handle) -> Option<Handle>;

    /// The station before `at`, or `None` at a boundary.
    fn step_backward(&self, at: Handle) -> Option<Handle>;

    fn contains(&self, at: Handle) -> bool {
        self.station(at).is_some()
    }
}
