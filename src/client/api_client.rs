//! # Admin API Client
//!
//! HTTP client for the backend admin API. Reads (existence checks and listings)
//! are retried on recoverable failures with exponential backoff; writes are sent
//! exactly once so a retry can never materialize a duplicate record.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::traits::AdminStore;
use crate::config::ApiEndpointConfig;
use crate::constants::{endpoints, MAX_RETRY_DELAY_MS};
use crate::error::{AdminError, AdminResult};
use crate::models::{
    ComboDraft, DailyCombo, DailyTask, DailyTaskDraft, ListEnvelope, MessageBody, TaskType,
};
use crate::planner::format_day;

/// Base delay of the read retry backoff (doubles per attempt)
const RETRY_BASE_DELAY_MS: u64 = 250;

/// Exponential backoff before retry `attempt` (1-based): 250ms, 500ms, 1s, ... capped
fn retry_delay(attempt: u32) -> Duration {
    let millis = 1u64
        .checked_shl(attempt.saturating_sub(1))
        .and_then(|factor| RETRY_BASE_DELAY_MS.checked_mul(factor))
        .map_or(MAX_RETRY_DELAY_MS, |delay| delay.min(MAX_RETRY_DELAY_MS));
    Duration::from_millis(millis)
}

/// HTTP client for the backend admin API
///
/// ```rust,no_run
/// use farm_admin::client::{AdminApiClient, AdminStore};
/// use farm_admin::config::ApiEndpointConfig;
/// use farm_admin::models::TaskType;
///
/// # async fn example() -> farm_admin::AdminResult<()> {
/// let client = AdminApiClient::new(ApiEndpointConfig::default())?;
/// let day = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let existing = client.find_daily_tasks(day, TaskType::Ad).await?;
/// println!("{} ad tasks on {day}", existing.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AdminApiClient {
    client: Client,
    config: ApiEndpointConfig,
    base_url: Url,
}

impl std::fmt::Debug for AdminApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout_ms", &self.config.timeout_ms)
            .field("max_retries", &self.config.max_retries)
            .field("auth_enabled", &self.config.auth_token.is_some())
            .finish()
    }
}

impl AdminApiClient {
    pub fn new(config: ApiEndpointConfig) -> AdminResult<Self> {
        // Url::join drops the last path segment unless the base ends with '/'
        let normalized = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|e| AdminError::config_error(format!("Invalid base URL: {e}")))?;

        let mut client_builder = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(format!("farm-admin/{}", env!("CARGO_PKG_VERSION")));

        if let Some(token) = config.auth_token.as_deref().filter(|t| !t.is_empty()) {
            let mut default_headers = reqwest::header::HeaderMap::new();
            default_headers.insert(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {token}")
                    .parse()
                    .map_err(|e| AdminError::config_error(format!("Invalid auth token: {e}")))?,
            );
            client_builder = client_builder.default_headers(default_headers);
            debug!("Configured Bearer token authentication");
        }

        let client = client_builder
            .build()
            .map_err(|e| AdminError::config_error(format!("Failed to create HTTP client: {e}")))?;

        info!(
            base_url = %base_url,
            timeout_ms = config.timeout_ms,
            auth_enabled = config.auth_token.is_some(),
            "Created admin API client"
        );

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn url(&self, path: &str) -> AdminResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AdminError::config_error(format!("Failed to construct URL: {e}")))
    }

    /// GET a `{ "data": [...] }` listing, retrying recoverable failures
    async fn get_list<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> AdminResult<Vec<T>> {
        let mut retries = 0;
        loop {
            let result = self.fetch_list(url.clone(), query).await;
            match result {
                Ok(items) => return Ok(items),
                Err(e) if e.is_recoverable() && retries < self.config.max_retries => {
                    retries += 1;
                    warn!(
                        url = %url,
                        error = %e,
                        retry = retries,
                        max_retries = self.config.max_retries,
                        "Recoverable error listing records, will retry"
                    );
                    tokio::time::sleep(retry_delay(retries)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> AdminResult<Vec<T>> {
        debug!(url = %url, "Listing records via admin API");
        let response = self.client.get(url).query(query).send().await?;
        let response = Self::ensure_success(response, "Failed to fetch records").await?;
        let envelope = response.json::<ListEnvelope<T>>().await?;
        Ok(envelope.data)
    }

    /// POST a payload once; the backend message becomes the error reason on failure
    async fn post_once<B: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
        fallback_message: &str,
    ) -> AdminResult<()> {
        let response = self.client.post(url).json(body).send().await?;
        Self::ensure_success(response, fallback_message).await?;
        Ok(())
    }

    async fn ensure_success(response: Response, fallback_message: &str) -> AdminResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<MessageBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| fallback_message.to_string());

        warn!(status = %status, error = %message, "Admin API request failed");
        Err(AdminError::api_error(status.as_u16(), message))
    }

    /// Every daily task, regardless of date or type
    ///
    /// `GET /admin/tasks/dailytasks`
    pub async fn list_daily_tasks(&self) -> AdminResult<Vec<DailyTask>> {
        let url = self.url(endpoints::DAILY_TASKS)?;
        self.get_list(url, &[]).await
    }

    /// `DELETE /admin/tasks/delete-dailytasks/{id}`
    pub async fn delete_daily_task(&self, task_id: &str) -> AdminResult<()> {
        if task_id.trim().is_empty() {
            return Err(AdminError::InvalidInput("task id must not be empty".into()));
        }
        let url = self.url(&format!("{}/{}", endpoints::DELETE_DAILY_TASK, task_id))?;
        let response = self.client.delete(url).send().await?;
        Self::ensure_success(response, "Failed to delete task").await?;
        info!(task_id = %task_id, "Deleted daily task");
        Ok(())
    }

    /// Combos active today
    ///
    /// `GET /admin/dailycombo/currentdailycombo`
    pub async fn current_daily_combos(&self) -> AdminResult<Vec<DailyCombo>> {
        let url = self.url(endpoints::CURRENT_DAILY_COMBO)?;
        self.get_list(url, &[]).await
    }
}

#[async_trait]
impl AdminStore for AdminApiClient {
    async fn find_daily_tasks(
        &self,
        date: NaiveDate,
        task_type: TaskType,
    ) -> AdminResult<Vec<DailyTask>> {
        let url = self.url(endpoints::DAILY_TASKS)?;
        let query = [
            ("date", format_day(date)),
            ("type", task_type.as_str().to_string()),
        ];
        self.get_list(url, &query).await
    }

    async fn create_daily_task(&self, draft: &DailyTaskDraft) -> AdminResult<()> {
        let url = self.url(endpoints::ADD_DAILY_TASK)?;
        debug!(
            date = %draft.start_date,
            task_type = %draft.template.task_type,
            "Creating daily task via admin API"
        );
        self.post_once(url, draft, "Failed to create task").await
    }

    async fn list_daily_combos(&self) -> AdminResult<Vec<DailyCombo>> {
        let url = self.url(endpoints::DAILY_COMBOS)?;
        self.get_list(url, &[]).await
    }

    async fn create_daily_combo(&self, draft: &ComboDraft) -> AdminResult<()> {
        let url = self.url(endpoints::CREATE_DAILY_COMBO)?;
        debug!(
            date = %draft.start_date,
            combo_name = %draft.combo_name,
            "Creating daily combo via admin API"
        );
        self.post_once(url, draft, "Failed to create combo").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_keeps_api_prefix() {
        let client = AdminApiClient::new(ApiEndpointConfig {
            base_url: "https://backend.example.com/api".to_string(),
            ..ApiEndpointConfig::default()
        })
        .unwrap();
        let url = client.url(endpoints::ADD_DAILY_TASK).unwrap();
        assert_eq!(
            url.as_str(),
            "https://backend.example.com/api/admin/tasks/add-dailytasks"
        );
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let result = AdminApiClient::new(ApiEndpointConfig {
            base_url: "::not a url::".to_string(),
            ..ApiEndpointConfig::default()
        });
        assert!(matches!(result, Err(AdminError::Configuration(_))));
    }

    #[test]
    fn test_retry_delay_doubles_then_caps() {
        assert_eq!(retry_delay(1), Duration::from_millis(250));
        assert_eq!(retry_delay(2), Duration::from_millis(500));
        assert_eq!(retry_delay(3), Duration::from_millis(1_000));
        assert_eq!(retry_delay(10), Duration::from_millis(MAX_RETRY_DELAY_MS));
        assert_eq!(retry_delay(64), Duration::from_millis(MAX_RETRY_DELAY_MS));
        assert_eq!(retry_delay(u32::MAX), Duration::from_millis(MAX_RETRY_DELAY_MS));
    }

    #[test]
    fn test_debug_hides_token() {
        let client = AdminApiClient::new(ApiEndpointConfig {
            auth_token: Some("top-secret".to_string()),
            ..ApiEndpointConfig::default()
        })
        .unwrap();
        let rendered = format!("{client:?}");
        assert!(rendered.contains("auth_enabled: true"));
        assert!(!rendered.contains("top-secret"));
    }
}
