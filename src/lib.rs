//! This crate provides two small linked-list applications on top of an
//! arena-backed cyclic list:
//!
//! - a [`Catalog`] of books kept in a singly linked list sorted by title, with
//!   borrow, return and an undo history;
//! - train routes, either [`LinearRoute`] or [`CircularRoute`], navigated by a
//!   [`TrainCursor`] that can also estimate travel time to a station.
//!
//! # The List
//!
//! [`List`] is a doubly-linked list whose nodes live in a `Vec`. Links are slot
//! indices, and slot 0 is a *ghost* node without payload that closes the
//! list into a cycle: `ghost.next` is the front and `ghost.prev` the back.
//! Elements are addressed by [`Handle`]s, which carry a generation so that a
//! handle to a removed element is detected instead of silently hitting
//! whatever reuses its slot.
//!
//! ```
//! use linked_routes::List;
//!
//! let mut list = List::from_iter([1, 2, 4]);
//! let two = list.position(|&x| x == 2).unwrap();
//! list.insert_after(two, 3).unwrap();
//! assert_eq!(Vec::from_iter(list.iter().copied()), vec![1, 2, 3, 4]);
//!
//! // Bounded moves stop at the ghost node, cyclic moves skip it.
//! let back = list.back().unwrap();
//! assert_eq!(list.next(back), None);
//! assert_eq!(list.next_cyclic(back), list.front());
//! ```
//!
//! # Routes and Cursors
//!
//! Both route kinds store their stations in a [`List`]. A linear route uses
//! the bounded moves, a circular one the cyclic moves. [`TrainCursor`] only
//! sees the [`Route`](route::Route) trait.
//!
//! ```
//! use linked_routes::route::{LinearRoute, Station, TrainCursor};
//!
//! let route = LinearRoute::from_iter([
//!     Station::new("Alpha", 3),
//!     Station::new("Bravo", 5),
//!     Station::new("Charlie", 2),
//!     Station::new("Delta", 4),
//! ]);
//! let cursor = TrainCursor::new(&route, Some("Bravo"));
//! assert_eq!(cursor.eta_to("Delta"), Ok(7));
//! assert!(cursor.eta_to("Alpha").is_err());
//! ```
//!
//! # Logging
//!
//! State changes are reported as `tracing` events at `debug` level and cursor
//! movement at `trace` level. The library never installs a subscriber.
//!
//! # Features
//!
//! - `serde`: derives `Serialize`/`Deserialize` for [`Book`], [`Station`] and
//!   [`Action`](catalog::Action).
//! - `cli`: builds the `linked-routes-demo` binary (pulls in `clap`, `anyhow`
//!   and `tracing-subscriber`).
//!
//! [`Book`]: crate::catalog::Book
//! [`Station`]: crate::route::Station

#[doc(inline)]
pub use catalog::{BookId, Catalog, CatalogError};
#[doc(inline)]
pub use list::{Handle, List, ListError};
#[doc(inline)]
pub use route::{CircularRoute, LinearRoute, RouteError, Station, TrainCursor};

pub mod catalog;
pub mod list;
pub mod route;
