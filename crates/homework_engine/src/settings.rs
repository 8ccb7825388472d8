use std::time::Duration;

use homework_core::PipelineError;

/// Timeouts applied to every outbound HTTP call.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientSettings {
    pub(crate) fn build_client(&self) -> Result<reqwest::Client, PipelineError> {
        reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.request_timeout)
            .build()
            .map_err(|err| PipelineError::Unexpected(format!("http client setup failed: {err}")))
    }
}
