use tracing::{debug, trace};

use crate::list::Handle;
use crate::route::{Route, RouteError, Station};

/// A cursor over a [`Route`].
///
/// The cursor points at one station (or nowhere, if the route is empty) and
/// can move back-and-forth. On a [`LinearRoute`](crate::route::LinearRoute)
/// moves stop at the first and last stations; on a
/// [`CircularRoute`](crate::route::CircularRoute) they wrap.
///
/// The cursor borrows its route, so the route cannot change under it. To keep
/// a position across mutations, save [`position`](TrainCursor::position) and
/// [`resume`](TrainCursor::resume) from it afterwards; if that station has
/// been removed in between, resuming fails with [`RouteError::StaleHandle`].
///
/// # Examples
///
/// ```
/// use linked_routes::route::{CircularRoute, Station, TrainCursor};
///
/// let route = CircularRoute::from_iter([
///     Station::new("North", 4),
///     Station::new("East", 3),
///     Station::new("South", 5),
///     Station::new("West", 2),
/// ]);
/// let mut cursor = TrainCursor::new(&route, Some("West"));
/// assert_eq!(cursor.advance(1).unwrap().name(), "North");
/// assert_eq!(cursor.retreat(1).unwrap().name(), "West");
/// assert_eq!(cursor.eta_to("South"), Ok(2 + 4 + 3));
/// ```
#[derive(Debug)]
pub struct TrainCursor<'r, R: Route> {
    route: &'r R,
    current: Option<Handle>,
}

impl<'r, R: Route> TrainCursor<'r, R> {
    /// Creates a cursor at the station named `start`, falling back to the
    /// first station when `start` is `None` or not on the route.
    pub fn new(route: &'r R, start: Option<&str>) -> Self {
        let current = start
            .and_then(|name| route.find(name))
            .or_else(|| route.front());
        Self { route, current }
    }

    /// Re-attaches a cursor at a previously saved position.
    pub fn resume(route: &'r R, at: Handle) -> Result<Self, RouteError> {
        if !route.contains(at) {
            return Err(RouteError::StaleHandle);
        }
        Ok(Self {
            route,
            current: Some(at),
        })
    }

    /// The handle of the current station, or `None` on an empty route.
    pub fn position(&self) -> Option<Handle> {
        self.current
    }

    pub fn current(&self) -> Option<&'r Station> {
        self.route.station(self.current?)
    }

    fn current_station(&self) -> Result<&'r Station, RouteError> {
        self.current().ok_or(RouteError::NoPosition)
    }

    /// Moves forward by `steps` stations and returns the new current station.
    ///
    /// On a linear route the cursor stops at the last station instead of
    /// running off the end.
    pub fn advance(&mut self, steps: usize) -> Result<&'r Station, RouteError> {
        let route = self.route;
        self.seek(steps, |at| route.step_forward(at))
    }

    /// Moves backward by `steps` stations and returns the new current station.
    ///
    /// On a linear route the cursor stops at the first station.
    pub fn retreat(&mut self, steps: usize) -> Result<&'r Station, RouteError> {
        let route = self.route;
        self.seek(steps, |at| route.step_backward(at))
    }

    /// Takes up to `steps` single steps. Once the cursor is back where it
    /// started, only `remaining % loop length` steps are still taken, so the
    /// walk never exceeds two passes over the route.
    fn seek<F>(&mut self, steps: usize, step: F) -> Result<&'r Station, RouteError>
    where
        F: Fn(Handle) -> Option<Handle>,
    {
        let start = self.current.ok_or(RouteError::NoPosition)?;
        let mut at = start;
        let mut remaining = steps;
        let mut moved = 0usize;
        while remaining > 0 {
            match step(at) {
                Some(next) => at = next,
                None => {
                    trace!(moved, requested = steps, "cursor stopped at route boundary");
                    break;
                }
            }
            remaining -= 1;
            moved += 1;
            if at == start {
                remaining %= moved;
            }
        }
        self.current = Some(at);
        self.current_station()
    }

    /// Moves the cursor to the first station named `name`. The cursor stays
    /// put if there is no such station.
    pub fn jump_to(&mut self, name: &str) -> Result<&'r Station, RouteError> {
        let at = self
            .route
            .find(name)
            .ok_or_else(|| RouteError::StationNotFound(name.to_owned()))?;
        debug!(station = name, "cursor jumped");
        self.current = Some(at);
        self.current_station()
    }

    /// Total travel time from the current station forward to `target`.
    ///
    /// Sums `minutes_to_next` of every station left behind; the current
    /// station being the target costs nothing. At most one full pass over the
    /// route is made, so a target that is missing, or that sits behind the
    /// cursor on a linear route, is [`RouteError::Unreachable`].
    pub fn eta_to(&self, target: &str) -> Result<u32, RouteError> {
        let mut at = self.current.ok_or(RouteError::NoPosition)?;
        let mut minutes = 0u32;
        for _ in 0..self.route.len() {
            let station = self.route.station(at).ok_or(RouteError::StaleHandle)?;
            if station.is_named(target) {
                return Ok(minutes);
            }
            minutes = minutes.saturating_add(station.minutes_to_next());
            match self.route.step_forward(at) {
                Some(next) => at = next,
                None => break,
            }
        }
        Err(RouteError::Unreachable(target.to_owned()))
    }
}
