//! Singapore bus arrivals server.
//!
//! A small web application that shows the next buses at a Singapore bus
//! stop, and sends a visitor's location to the arrivals page of the nearest
//! stop.

pub mod config;
pub mod datamall;
pub mod directory;
pub mod domain;
pub mod logging;
pub mod web;
