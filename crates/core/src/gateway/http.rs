//! HTTP gateway backed by reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;

use super::{AlertMessage, AlertSink, ApiError, OrderSource, UpdateSink};
use crate::config::{EndpointsConfig, HttpConfig};
use crate::order::Order;

/// Longest slice of an error response body kept in `ApiError::Status`.
const ERROR_BODY_LIMIT: usize = 200;

/// Talks to the order source, alert and update endpoints over HTTP.
pub struct HttpGateway {
    client: Client,
    endpoints: EndpointsConfig,
}

impl HttpGateway {
    /// Create a new gateway for the given endpoints.
    pub fn new(endpoints: EndpointsConfig, http: &HttpConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(http.user_agent.clone());
        if let Some(secs) = http.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { client, endpoints })
    }

    /// Create a gateway around an existing client.
    pub fn with_client(client: Client, endpoints: EndpointsConfig) -> Self {
        Self { client, endpoints }
    }

    pub fn endpoints(&self) -> &EndpointsConfig {
        &self.endpoints
    }
}

/// Turn a non-success response into `ApiError::Status`.
async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body: body.chars().take(ERROR_BODY_LIMIT).collect(),
    })
}

#[async_trait]
impl OrderSource for HttpGateway {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, ApiError> {
        debug!(url = %self.endpoints.orders_url, "Fetching orders");

        let response = self.client.get(&self.endpoints.orders_url).send().await?;
        let response = ensure_success(response).await?;

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ApiError::Decode(format!("Order payload is not an order array: {}", e)))
    }
}

#[async_trait]
impl AlertSink for HttpGateway {
    fn name(&self) -> &str {
        "http"
    }

    async fn send_alert(&self, alert: &AlertMessage) -> Result<(), ApiError> {
        debug!(url = %self.endpoints.alert_url, "Posting alert");

        let response = self
            .client
            .post(&self.endpoints.alert_url)
            .json(alert)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl UpdateSink for HttpGateway {
    fn name(&self) -> &str {
        "http"
    }

    async fn send_update(&self, order: &Order) -> Result<(), ApiError> {
        debug!(url = %self.endpoints.update_url, order_id = %order.order_id, "Posting order update");

        let response = self
            .client
            .post(&self.endpoints.update_url)
            .json(order)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}
