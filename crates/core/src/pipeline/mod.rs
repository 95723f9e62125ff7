//! The order processing pipeline.
//!
//! Stages, composed by `BatchRunner`:
//! - `Fetcher`: pulls the batch from the order source, degrading failures to
//!   an empty batch
//! - `OrderProcessor`: alerts for each delivered item through the
//!   `AlertDispatcher` and derives the order's `processStatus`
//! - `Updater`: forwards fully processed orders to the update endpoint
//!
//! Every network call is a containment boundary: failures are logged,
//! emitted as events and never returned to the caller. Orders and items are
//! handled strictly one at a time.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use delivery_notifier_core::{BatchRunner, HttpGateway, Config};
//!
//! let config = Config::default();
//! let gateway = HttpGateway::new(config.endpoints.clone(), &config.http)?;
//! let runner = BatchRunner::from_gateway(Arc::new(gateway));
//!
//! let summary = runner.run().await;
//! println!("{} orders forwarded", summary.updates_sent);
//! ```

mod alert;
mod fetcher;
mod processor;
mod runner;
mod types;
mod updater;

pub use alert::{alert_message, AlertDispatcher};
pub use fetcher::Fetcher;
pub use processor::OrderProcessor;
pub use runner::{run_batch, BatchRunner};
pub use types::{
    AlertOutcome, BatchSummary, ProcessTally, ProcessedOrder, UpdateOutcome,
};
pub use updater::Updater;
