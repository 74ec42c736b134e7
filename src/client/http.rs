//! HTTP client for the employee REST API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::api::EmployeeApi;
use super::error::{ClientError, ClientResult};
use crate::config::{
    API_VERSION_PREFIX, DEFAULT_CLIENT_TIMEOUT_SECONDS, DEFAULT_SERVER_PORT, EMPLOYEES_PATH,
};
use crate::domain::{Employee, EmployeeChanges, EmployeeListParams, EmployeePage, NewEmployee};
use crate::types::MessageResponse;

/// Client connection settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server root, e.g. `http://localhost:5000`
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_CLIENT_TIMEOUT_SECONDS,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(format!("http://localhost:{}", DEFAULT_SERVER_PORT))
    }
}

/// Error body returned by the server
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// reqwest-backed [`EmployeeApi`]
#[derive(Debug, Clone)]
pub struct HttpEmployeeClient {
    client: Client,
    employees_url: String,
}

impl HttpEmployeeClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            employees_url: format!(
                "{}{}{}",
                config.base_url.trim_end_matches('/'),
                API_VERSION_PREFIX,
                EMPLOYEES_PATH
            ),
        })
    }

    fn employee_url(&self, employee_id: i64) -> String {
        format!("{}/{}", self.employees_url, employee_id)
    }

    /// Decode a success body or turn the error envelope into a [`ClientError`]
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|envelope| envelope.error.message)
                .unwrap_or(text);
            tracing::debug!(%status, %message, "Employee API request failed");

            return match status {
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(message)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
                _ => Err(ClientError::Server(message)),
            };
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl EmployeeApi for HttpEmployeeClient {
    async fn create(&self, employee: NewEmployee) -> ClientResult<Employee> {
        let response = self
            .client
            .post(&self.employees_url)
            .json(&employee)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn list(&self, params: EmployeeListParams) -> ClientResult<EmployeePage> {
        let response = self
            .client
            .get(&self.employees_url)
            .query(&params)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn get(&self, employee_id: i64) -> ClientResult<Employee> {
        let response = self.client.get(self.employee_url(employee_id)).send().await?;
        Self::handle_response(response).await
    }

    async fn update(&self, employee_id: i64, changes: EmployeeChanges) -> ClientResult<Employee> {
        let response = self
            .client
            .patch(self.employee_url(employee_id))
            .json(&changes)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn delete(&self, employee_id: i64) -> ClientResult<String> {
        let response = self
            .client
            .delete(self.employee_url(employee_id))
            .send()
            .await?;
        let body: MessageResponse = Self::handle_response(response).await?;
        Ok(body.message)
    }
}
