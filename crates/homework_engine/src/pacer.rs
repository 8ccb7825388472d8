use std::time::Duration;

/// Waits between poll iterations.
#[async_trait::async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, interval: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokioPacer;

#[async_trait::async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, interval: Duration) {
        tokio::time::sleep(interval).await;
    }
}
