//! Gateways to the collaborators of the pipeline.
//!
//! The pipeline only depends on the traits in this module:
//! - `OrderSource`: fetches the batch of orders
//! - `AlertSink`: receives one alert per delivered item
//! - `UpdateSink`: receives each fully processed order
//!
//! `HttpGateway` implements all three against HTTP endpoints;
//! `SimulatedGateway` implements them in-process for dry runs.

mod error;
mod http;
mod simulated;
mod traits;

pub use error::ApiError;
pub use http::HttpGateway;
pub use simulated::SimulatedGateway;
pub use traits::{AlertMessage, AlertSink, OrderSource, UpdateSink};
