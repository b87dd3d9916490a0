//! Web layer for the bus arrivals front-end.
//!
//! Provides the arrivals page, the nearest-stop redirect and visitor
//! tracking.

mod dto;
mod routes;
mod state;
pub mod templates;
mod visitor;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
pub use visitor::Visitor;
