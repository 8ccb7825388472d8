use bot_logging::bot_debug;
use homework_core::{PipelineError, TransportFailure};
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use url::Url;

use crate::ClientSettings;

/// Remote endpoint reporting homework statuses.
#[async_trait::async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetches the raw JSON body for statuses changed since `from_date`.
    async fn poll(&self, from_date: i64) -> Result<serde_json::Value, PipelineError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestStatusSource {
    endpoint: Url,
    token: String,
    client: reqwest::Client,
}

impl ReqwestStatusSource {
    pub fn new(
        endpoint: Url,
        token: impl Into<String>,
        settings: &ClientSettings,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            endpoint,
            token: token.into(),
            client: settings.build_client()?,
        })
    }

    fn request_url(&self, from_date: i64) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("from_date", &from_date.to_string());
        url
    }
}

#[async_trait::async_trait]
impl StatusSource for ReqwestStatusSource {
    async fn poll(&self, from_date: i64) -> Result<serde_json::Value, PipelineError> {
        bot_debug!("Requesting homework statuses from_date={}", from_date);
        let response = self
            .client
            .get(self.request_url(from_date))
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(PipelineError::Auth(format!(
                "<PRACTICUM_TOKEN> is invalid, status code {}",
                status.as_u16()
            )));
        }
        if status != StatusCode::OK {
            return Err(PipelineError::transport(
                TransportFailure::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&body)
            .map_err(|err| PipelineError::transport(TransportFailure::Decode, err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> PipelineError {
    let err = err.without_url();
    if err.is_builder() {
        return PipelineError::Unexpected(format!("api request could not be built: {err}"));
    }
    if err.is_timeout() {
        return PipelineError::transport(TransportFailure::Timeout, err.to_string());
    }
    if err.is_decode() {
        return PipelineError::transport(TransportFailure::Decode, err.to_string());
    }
    if err.is_connect() || err.is_request() || err.is_body() || err.is_redirect() {
        return PipelineError::transport(TransportFailure::Network, err.to_string());
    }
    PipelineError::Unexpected(format!("api request failed: {err}"))
}
