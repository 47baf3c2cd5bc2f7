//! HTTP source for a running scheduler service

use std::time::Duration;

use super::ScheduleSource;
use crate::types::{Result, TimegridError};

/// HTTP request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 10;

pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl ScheduleSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn read_bytes(&self) -> Result<Vec<u8>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| TimegridError::Fetch(format!("HTTP client error: {}", e)))?;

        let response = client
            .get(&self.url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| TimegridError::Fetch(format!("HTTP request failed: {}", e)))?;

        let body = response
            .bytes()
            .map_err(|e| TimegridError::Fetch(format!("HTTP body read failed: {}", e)))?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_host_is_fetch_error() {
        // Port 9 on localhost: connection refused without touching the network
        let source = HttpSource::new("http://127.0.0.1:9/schedule")
            .with_timeout(Duration::from_millis(500));
        let result = source.read_bytes();
        assert!(matches!(result, Err(TimegridError::Fetch(_))));
    }
}
