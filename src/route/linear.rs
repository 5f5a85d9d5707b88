use std::fmt;
use std::iter::Rev;

use tracing::debug;

use crate::list::{Handle, Iter, List};
use crate::route::{Route, RouteError, Station};

/// A route with a first and a last station: `front <-> ... <-> back`.
///
/// # Examples
///
/// ```
/// use linked_routes::route::{LinearRoute, Station};
///
/// let mut route = LinearRoute::from_iter([
///     Station::new("Alpha", 3),
///     Station::new("Bravo", 5),
///     Station::new("Charlie", 2),
///     Station::new("Delta", 4),
/// ]);
/// let charlie = route.find("charlie").unwrap();
/// route.insert_after(charlie, Station::new("Echo", 6)).unwrap();
/// assert_eq!(route.to_string(), "Alpha <-> Bravo <-> Charlie <-> Echo <-> Delta");
/// ```
#[derive(Debug, Default, PartialEq)]
pub struct LinearRoute {
    stations: List<Station>,
}

impl LinearRoute {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn front(&self) -> Option<Handle> {
        self.stations.front()
    }

    pub fn back(&self) -> Option<Handle> {
        self.stations.back()
    }

    pub fn station(&self, at: Handle) -> Option<&Station> {
        self.stations.get(at)
    }

    pub fn station_mut(&mut self, at: Handle) -> Option<&mut Station> {
        self.stations.get_mut(at)
    }

    /// Adds a station after the current last one.
    pub fn append(&mut self, station: Station) -> Handle {
        debug!(station = station.name(), "appending station to linear route");
        self.stations.push_back(station)
    }

    pub fn find(&self, name: &str) -> Option<Handle> {
        self.stations.position(|station| station.is_named(name))
    }

    /// Inserts a station right after `anchor`. Inserting after the last
    /// station makes the new one the last.
    pub fn insert_after(&mut self, anchor: Handle, station: Station) -> Result<Handle, RouteError> {
        debug!(station = station.name(), "inserting station into linear route");
        Ok(self.stations.insert_after(anchor, station)?)
    }

    /// Unlinks the station behind `at`. Removing the first or last station
    /// moves that boundary to its neighbour.
    pub fn remove(&mut self, at: Handle) -> Result<Station, RouteError> {
        let station = self.stations.remove(at)?;
        debug!(station = station.name(), "removed station from linear route");
        Ok(station)
    }

    /// Stations from first to last.
    pub fn iter_forward(&self) -> Iter<'_, Station> {
        self.stations.iter()
    }

    /// Stations from last to first.
    pub fn iter_backward(&self) -> Rev<Iter<'_, Station>> {
        self.stations.iter().rev()
    }
}

impl Route for LinearRoute {
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
        LinearRoute::find(self, name)
    }

    fn step_forward(&self, at: Handle) -> Option<Handle> {
        self.stations.next(at)
    }

    fn step_backward(&self, at: Handle) -> Option<Handle> {
        self.stations.prev(at)
    }
}

impl FromIterator<Station> for LinearRoute {
    fn from_iter<I: IntoIterator<Item = Station>>(iter: I) -> Self {
        Self {
            stations: List::from_iter(iter),
        }
    }
}

impl fmt::Display for LinearRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, station) in self.stations.iter().enumerate() {
            if i > 0 {
                f.write_str(" <-> ")?;
            }
            f.write_str(station.name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(iter: impl Iterator<Item = &'a Station>) -> Vec<&'a str> {
        iter.map(|station| station.name()).collect()
    }

    fn abcd() -> LinearRoute {
        LinearRoute::from_iter(["A", "B", "C", "D"].map(Station::terminal))
    }

    #[test]
    fn iterate_both_ways() {
        let route = abcd();
        assert_eq!(names(route.iter_forward()), vec!["A", "B", "C", "D"]);
        assert_eq!(names(route.iter_backward()), vec!["D", "C", "B", "A"]);
        // restartable
        assert_eq!(route.iter_forward().count(), 4);
    }

    #[test]
    fn find_is_case_insensitive() {
        let route = abcd();
        let c = route.find("c").unwrap();
        assert_eq!(route.station(c).unwrap().name(), "C");
        assert_eq!(route.find("E"), None);
        assert_eq!(LinearRoute::new().find("A"), None);
    }

    #[test]
    fn insert_after_last_moves_back() {
        let mut route = abcd();
        let d = route.back().unwrap();
        let e = route.insert_after(d, Station::terminal("E")).unwrap();
        assert_eq!(route.back(), Some(e));
        assert_eq!(names(route.iter_backward()), vec!["E", "D", "C", "B", "A"]);
    }

    #[test]
    fn remove_boundaries() {
        let mut route = abcd();
        let a = route.front().unwrap();
        let d = route.back().unwrap();
        assert_eq!(route.remove(a).unwrap().name(), "A");
        assert_eq!(route.remove(d).unwrap().name(), "D");
        assert_eq!(route.station(route.front().unwrap()).unwrap().name(), "B");
        assert_eq!(route.station(route.back().unwrap()).unwrap().name(), "C");
        assert_eq!(route.remove(a), Err(RouteError::StaleHandle));
        assert_eq!(route.to_string(), "B <-> C");

        let b = route.front().unwrap();
        let c = route.back().unwrap();
        route.remove(b).unwrap();
        route.remove(c).unwrap();
        assert!(route.is_empty());
        assert_eq!(route.front(), None);
        assert_eq!(route.to_string(), "");
    }

    #[test]
    fn boundaries_do_not_wrap() {
        let route = abcd();
        assert_eq!(route.step_forward(route.back().unwrap()), None);
        assert_eq!(route.step_backward(route.front().unwrap()), None);
    }

    #[test]
    fn station_mut_updates_travel_time() {
        let mut route = abcd();
        let b = route.find("B").unwrap();
        route.station_mut(b).unwrap().set_minutes_to_next(9);
        assert_eq!(route.station(b).unwrap().minutes_to_next(), 9);
    }
}
