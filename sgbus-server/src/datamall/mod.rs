//! LTA DataMall bus arrival client.
//!
//! Fetches live arrival estimates for a bus stop from the `BusArrivalv2`
//! endpoint. Every request carries the account key in the `AccountKey`
//! header. Responses are not cached.

mod client;
mod error;
mod types;

pub use client::{DatamallClient, DatamallConfig};
pub use error::DatamallError;
pub use types::{BusArrivals, NextBus, ServiceArrival};
