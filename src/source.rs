use crate::errors::AppError;
use crate::models::CounterSnapshot;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

pub trait SnapshotSource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<CounterSnapshot, AppError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl SnapshotSource for HttpSource {
    async fn fetch(&self) -> Result<CounterSnapshot, AppError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(format!("GET {} returned {status}", self.url)));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
