// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client for the upstream vessel-schedule feed.
//!
//! The feed reports its real status in the envelope's embedded `code`
//! field; an HTTP 200 with `code != 200` is still a failure. Both
//! transport failures and business failures are retried with exponential
//! backoff, and after the retries are exhausted the last envelope is
//! returned as-is so the caller can inspect the embedded code.

use chrono::{Duration as ChronoDuration, Local};
use sailplan_domain::FeedEnvelope;
use serde_json::json;
use std::time::Duration;
use tracing::{info, warn};

/// Retries after the initial attempt.
const MAX_RETRIES: u32 = 3;

/// Initial retry delay; doubles on each retry.
const INITIAL_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Errors raised by the feed client.
#[derive(Debug, thiserror::Error)]
pub enum FeedClientError {
    /// The request could not be built.
    #[error("Failed to build feed request: {0}")]
    RequestBuild(String),
}

/// One feed query's parameters.
#[derive(Debug, Clone)]
pub struct FeedQuery {
    /// Feed endpoint URL.
    pub url: String,
    /// Access token.
    pub token: String,
    /// Company code the token belongs to.
    pub company_code: String,
    /// Port of loading code.
    pub pol_cd: String,
    /// Port of discharge code.
    pub pod_cd: String,
    /// How many days before today the schedule window starts.
    pub days_back: i64,
    /// How many weeks ahead to query.
    pub weeks_out: String,
    /// Whether to include transshipment routings ("0"/"1").
    pub is_transit: String,
}

impl FeedQuery {
    /// Builds the request URL with its authentication query string.
    #[must_use]
    pub fn request_url(&self) -> String {
        format!(
            "{}?token={}&companyCode={}&orgCode=null",
            self.url, self.token, self.company_code
        )
    }

    /// Builds the JSON request body.
    ///
    /// The schedule window starts `days_back` days before today so
    /// recently departed sailings are still captured.
    #[must_use]
    pub fn request_body(&self) -> serde_json::Value {
        let start_date: String = (Local::now() - ChronoDuration::days(self.days_back))
            .format("%Y-%m-%d")
            .to_string();
        json!({
            "polCd": self.pol_cd,
            "podCd": self.pod_cd,
            "etd": start_date,
            "weeksOut": self.weeks_out,
            "isTransit": self.is_transit,
        })
    }
}

/// Returns the delay before the given retry (0-based).
#[must_use]
pub fn retry_delay(retry: u32) -> Duration {
    INITIAL_RETRY_DELAY * 2_u32.saturating_pow(retry)
}

/// Synthesizes an error envelope for a terminal transport failure.
fn transport_failure_envelope(message: &str) -> FeedEnvelope {
    FeedEnvelope {
        code: 500,
        message: Some(format!("Feed request failed: {message}")),
        result: Vec::new(),
    }
}

/// Fetches one route's candidate sailings from the feed.
///
/// Always yields an envelope: business failures are returned as the last
/// envelope received, and a terminal transport failure is folded into a
/// synthetic `code = 500` envelope. Callers must check `is_ok()`.
///
/// # Errors
///
/// Returns an error only when the request cannot be constructed at all.
pub async fn fetch_vessel_schedules(
    client: &reqwest::Client,
    query: &FeedQuery,
) -> Result<FeedEnvelope, FeedClientError> {
    let url: reqwest::Url = reqwest::Url::parse(&query.request_url())
        .map_err(|e| FeedClientError::RequestBuild(e.to_string()))?;
    let body: serde_json::Value = query.request_body();

    let mut last_failure: String = String::from("no attempt made");

    for attempt in 0..=MAX_RETRIES {
        if attempt > 0 {
            let delay: Duration = retry_delay(attempt - 1);
            warn!(
                pol = %query.pol_cd,
                pod = %query.pod_cd,
                attempt,
                delay_secs = delay.as_secs(),
                "Retrying feed request"
            );
            tokio::time::sleep(delay).await;
        }

        let response = match client.post(url.clone()).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                last_failure = e.to_string();
                continue;
            }
        };

        match response.json::<FeedEnvelope>().await {
            Ok(envelope) => {
                if envelope.is_ok() {
                    info!(
                        pol = %query.pol_cd,
                        pod = %query.pod_cd,
                        rows = envelope.result.len(),
                        "Feed request succeeded"
                    );
                    return Ok(envelope);
                }
                warn!(
                    pol = %query.pol_cd,
                    pod = %query.pod_cd,
                    code = envelope.code,
                    message = envelope.message.as_deref().unwrap_or(""),
                    "Feed returned business error"
                );
                if attempt == MAX_RETRIES {
                    // Hand the last error envelope back unmodified.
                    return Ok(envelope);
                }
            }
            Err(e) => {
                last_failure = format!("undecodable response: {e}");
            }
        }
    }

    Ok(transport_failure_envelope(&last_failure))
}
