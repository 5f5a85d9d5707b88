use std::fmt;

use tracing::debug;

use crate::list::{Handle, Iter, List};
use crate::route::{Route, RouteError, Station};

/// A loop route: the station after the last one is the first one again.
///
/// The stations sit in a [`List`] whose ghost node is skipped when stepping,
/// so traversal by links alone never ends. Everything that walks the loop is
/// bounded by [`size`](CircularRoute::size).
///
/// # Examples
///
/// ```
/// use linked_routes::route::{CircularRoute, Station};
///
/// let mut route = CircularRoute::from_iter(
///     ["North", "East", "South", "West"].map(|name| Station::new(name, 1)),
/// );
/// assert_eq!(route.to_string(), "North <-> East <-> South <-> West  (loops)");
///
/// let south = route.find("south").unwrap();
/// route.remove(south).unwrap();
/// assert_eq!(route.size(), 3);
/// ```
#[derive(Debug, Default, PartialEq)]
pub struct CircularRoute {
    stations: List<Station>,
}

impl CircularRoute {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stations in the loop.
    pub fn size(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// The designated first station, where iteration starts.
    pub fn front(&self) -> Option<Handle> {
        self.stations.front()
    }

    pub fn station(&self, at: Handle) -> Option<&Station> {
        self.stations.get(at)
    }

    pub fn station_mut(&mut self, at: Handle) -> Option<&mut Station> {
        self.stations.get_mut(at)
    }

    /// Adds a station at the logical end of the loop, right before the first
    /// station.
    pub fn append(&mut self, station: Station) -> Handle {
        debug!(station = station.name(), "appending station to loop");
        self.stations.push_back(station)
    }

    pub fn find(&self, name: &str) -> Option<Handle> {
        self.stations.position(|station| station.is_named(name))
    }

    /// Inserts a station right after `anchor`. Inserting after the last
    /// station puts the new one between it and the first.
    pub fn insert_after(&mut self, anchor: Handle, station: Station) -> Result<Handle, RouteError> {
        debug!(station = station.name(), "inserting station into loop");
        Ok(self.stations.insert_after(anchor, station)?)
    }

    /// Unlinks the station behind `at`.
    ///
    /// Removing the first station hands that role to its successor; removing
    /// the only station leaves the loop empty.
    pub fn remove(&mut self, at: Handle) -> Result<Station, RouteError> {
        let station = self.stations.remove(at)?;
        debug!(station = station.name(), remaining = self.size(), "removed station from loop");
        Ok(station)
    }

    /// Each station exactly once, starting at the first.
    pub fn iter_once(&self) -> Iter<'_, Station> {
        self.stations.iter()
    }
}

impl Route for CircularRoute {
    fn len(&self) -> usize {
        self.stations.len()
    }

    fn front(&self) -> Option<Handle> {
        self.stations.front()
    }

    fn station(&self, at: Handle) -> Option<&Station> {
        self.stations.get(at)
    }

    fn find(&self, name: &str) -> Option<Handle> {
        CircularRoute::find(self, name)
    }

    fn step_forward(&self, at: Handle) -> Option<Handle> {
        self.stations.next_cyclic(at)
    }

    fn step_backward(&self, at: Handle) -> Option<Handle> {
        self.stations.prev_cyclic(at)
    }
}

impl FromIterator<Station> for CircularRoute {
    fn from_iter<I: IntoIterator<Item = Station>>(iter: I) -> Self {
        Self {
            stations: List::from_iter(iter),
        }
    }
}

impl fmt::Display for CircularRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(empty)");
        }
        for (i, station) in self.iter_once().enumerate() {
            if i > 0 {
                f.write_str(" <-> ")?;
            }
            f.write_str(station.name())?;
        }
        f.write_str("  (loops)")
    }
}
