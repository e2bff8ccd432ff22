//! REST client for the vision backend.
//!
//! One [`HttpVisionBackend`] implements every collaborator trait, since they
//! all live behind the same base URL.

use crate::dto::{
    AdaptationFactorsDto, ConeTestRecord, ConeValuesDto, CreateUserRequest, CreateUserResponse,
    PerformanceStatsDto, SaveConeTestRequest, SavePerformanceRequest,
};
use async_trait::async_trait;
use ophthalmos_core::adaptation::{AdaptationFactors, AdaptationService};
use ophthalmos_core::config::BackendSettings;
use ophthalmos_core::cone::{ProfileRepository, SensitivityProfile};
use ophthalmos_core::error::{OphthalmosError, Result};
use ophthalmos_core::performance::{PerformanceRepository, PerformanceResult, PerformanceStats};
use ophthalmos_core::user::{AccountService, UserId};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP implementation of the account, profile, adaptation and performance
/// collaborators.
#[derive(Debug, Clone)]
pub struct HttpVisionBackend {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpVisionBackend {
    /// Creates a client for `base_url` (without the `/api` suffix).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            timeout,
        }
    }

    pub fn from_settings(settings: &BackendSettings) -> Self {
        Self::new(&settings.base_url, Duration::from_secs(settings.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    /// Sends `request` and fails on transport errors.
    async fn send(&self, request: RequestBuilder, action: &str) -> Result<Response> {
        request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| OphthalmosError::service(format!("Failed to {}: {}", action, e)))
    }

    /// Sends `request` and fails on transport errors or a non-success status.
    async fn send_checked(&self, request: RequestBuilder, action: &str) -> Result<Response> {
        let response = self.send(request, action).await?;
        ensure_success(response, action).await
    }
}

async fn ensure_success(response: Response, action: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(OphthalmosError::service(format!(
        "Failed to {} ({}): {}",
        action, status, error_text
    )))
}

async fn read_json<T: DeserializeOwned>(response: Response, action: &str) -> Result<T> {
    response.json::<T>().await.map_err(|e| OphthalmosError::Serialization {
        format: "JSON".to_string(),
        message: format!("Failed to parse response to {}: {}", action, e),
    })
}

#[async_trait]
impl AccountService for HttpVisionBackend {
    async fn create_account(&self, name: &str) -> Result<UserId> {
        let request = self
            .client
            .post(self.url("users"))
            .json(&CreateUserRequest { name });
        let response = self.send_checked(request, "create account").await?;
        let body: CreateUserResponse = read_json(response, "create account").await?;

        tracing::info!(user_id = %body.user_id, "account created");
        Ok(UserId::new(body.user_id))
    }
}

#[async_trait]
impl ProfileRepository for HttpVisionBackend {
    async fn fetch_latest_profile(&self, user_id: &UserId) -> Result<Option<SensitivityProfile>> {
        let path = format!("cone-tests/{}/latest", user_id);
        let response = self
            .send(self.client.get(self.url(&path)), "fetch latest profile")
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(%user_id, "no cone test on record");
            return Ok(None);
        }
        let response = ensure_success(response, "fetch latest profile").await?;
        let record: ConeTestRecord = read_json(response, "fetch latest profile").await?;
        Ok(Some(record.values.into()))
    }

    async fn save_profile(&self, user_id: &UserId, profile: &SensitivityProfile) -> Result<()> {
        let body = SaveConeTestRequest {
            user_id: user_id.as_str(),
            values: ConeValuesDto::from(profile),
        };
        let request = self.client.post(self.url("cone-tests")).json(&body);
        self.send_checked(request, "save profile").await?;

        tracing::debug!(%user_id, ?profile, "profile saved");
        Ok(())
    }
}

#[async_trait]
impl AdaptationService for HttpVisionBackend {
    async fn fetch_adaptation_factors(&self, profile: &SensitivityProfile) -> Result<AdaptationFactors> {
        let request = self
            .client
            .post(self.url("color-adaptation"))
            .json(&ConeValuesDto::from(profile));
        let response = self.send_checked(request, "fetch adaptation factors").await?;
        let factors: AdaptationFactorsDto = read_json(response, "fetch adaptation factors").await?;
        Ok(factors.into())
    }
}

#[async_trait]
impl PerformanceRepository for HttpVisionBackend {
    async fn save_performance_result(&self, user_id: &UserId, result: &PerformanceResult) -> Result<()> {
        let request = self
            .client
            .post(self.url("performance-tests"))
            .json(&SavePerformanceRequest::new(user_id, result));
        self.send_checked(request, "save performance result").await?;
        Ok(())
    }

    async fn fetch_performance_stats(&self, user_id: &UserId) -> Result<PerformanceStats> {
        let path = format!("performance-tests/{}/stats", user_id);
        let response = self
            .send_checked(self.client.get(self.url(&path)), "fetch performance stats")
            .await?;
        let stats: PerformanceStatsDto = read_json(response, "fetch performance stats").await?;
        Ok(stats.into())
    }
}
