//! Remote email function client
//!
//! Delivery is delegated to an HTTP function that accepts
//! `{from, to, cc, subject, body}` as JSON with an optional bearer key.

use serde::Serialize;
use shared::error::{AppError, AppResult, ErrorCode};
use std::time::Duration;

use crate::core::Config;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct EmailPayload<'a> {
    from: &'a str,
    to: &'a [String],
    cc: &'a [String],
    subject: &'a str,
    body: &'a str,
}

#[derive(Debug, Clone)]
pub struct EmailFunctionClient {
    client: reqwest::Client,
    url: String,
    key: Option<String>,
    from: String,
}

impl EmailFunctionClient {
    /// `None` when `EMAIL_FUNCTION_URL` is unset
    pub fn from_config(config: &Config) -> AppResult<Option<Self>> {
        let Some(url) = config.email_function_url.clone() else {
            return Ok(None);
        };
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Some(Self {
            client,
            url,
            key: config.email_function_key.clone(),
            from: config.email_from.clone(),
        }))
    }

    pub async fn send(
        &self,
        to: &[String],
        cc: &[String],
        subject: &str,
        body: &str,
    ) -> AppResult<()> {
        let payload = EmailPayload {
            from: &self.from,
            to,
            cc,
            subject,
            body,
        };

        let mut request = self.client.post(&self.url).json(&payload);
        if let Some(key) = &self.key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            AppError::with_message(ErrorCode::EmailSendFailed, format!("Email function unreachable: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::with_message(
                ErrorCode::EmailSendFailed,
                format!("Email function returned {status}"),
            )
            .with_detail("status", status.as_u16())
            .with_detail("response", text));
        }

        tracing::info!(recipients = to.len(), "Email delivered through remote function");
        Ok(())
    }
}
