use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub mode: RunMode,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which gateway the batch runs against
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Talk to the configured HTTP endpoints.
    #[default]
    Live,
    /// Built-in sample orders, alerts and updates acknowledged locally.
    Simulated,
}

/// Collaborator endpoint addresses
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointsConfig {
    /// Order source, queried with GET.
    #[serde(default = "default_orders_url")]
    pub orders_url: String,
    /// Alert endpoint, one POST per delivered item.
    #[serde(default = "default_alert_url")]
    pub alert_url: String,
    /// Update endpoint, one POST per fully processed order.
    #[serde(default = "default_update_url")]
    pub update_url: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            orders_url: default_orders_url(),
            alert_url: default_alert_url(),
            update_url: default_update_url(),
        }
    }
}

fn default_orders_url() -> String {
    "https://orders-api.com/orders".to_string()
}

fn default_alert_url() -> String {
    "https://alert-api.com/alerts".to_string()
}

fn default_update_url() -> String {
    "https://update-api.com/update".to_string()
}

/// HTTP client settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    /// Request timeout in seconds. Unset leaves the transport default in place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("delivery-notifier/{}", env!("CARGO_PKG_VERSION"))
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}
