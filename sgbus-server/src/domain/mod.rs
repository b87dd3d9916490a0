//! Domain types for the bus arrivals front-end.
//!
//! Types here enforce their invariants at construction time, so code that
//! receives a `Point` or `BusStop` can trust the coordinates are valid.

mod point;
mod stop;

pub use point::{InvalidPoint, Point};
pub use stop::BusStop;
