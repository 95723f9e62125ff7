pub mod config;
pub mod events;
pub mod gateway;
pub mod order;
pub mod pipeline;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, load_default_config, validate_config, Config,
    ConfigError, EndpointsConfig, HttpConfig, LoggingConfig, RunMode,
};
pub use events::{create_event_system, EventCollector, EventEnvelope, EventHandle, PipelineEvent};
pub use gateway::{
    AlertMessage, AlertSink, ApiError, HttpGateway, OrderSource, SimulatedGateway, UpdateSink,
};
pub use order::{is_delivered, Item, ItemId, OpaqueId, Order, OrderId, ProcessStatus};
pub use pipeline::{
    alert_message, run_batch, AlertDispatcher, AlertOutcome, BatchRunner, BatchSummary, Fetcher,
    OrderProcessor, ProcessTally, ProcessedOrder, UpdateOutcome, Updater,
};
