use std::time::Duration;

use crate::error::Result;

/// Blocking GET returning the response body.
pub trait Transport {
    fn get(&self, url: &str, timeout: Duration) -> Result<Vec<u8>>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str, timeout: Duration) -> Result<Vec<u8>> {
        (**self).get(url, timeout)
    }
}

/// `reqwest` blocking transport. Non-2xx statuses are transport errors.
/// Errors carry no URL, since the URL holds the API key.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, timeout: Duration) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(reqwest::Error::without_url)?;
        let body = response.bytes().map_err(reqwest::Error::without_url)?;
        Ok(body.to_vec())
    }
}
