use crate::error::{Error, Result};
use crate::models::{AnalyticData, AnalyticDataQuery, DailySummary};
use crate::services::decoder::{self, api_error};
use crate::services::request_builder::{build_url, redact_key};
use crate::services::transport::{HttpTransport, Transport};
use crate::utils::config::ClientConfig;

/// RescueTime API client. Holds only configuration, so one instance can be
/// shared freely between threads.
#[derive(Debug, Clone)]
pub struct RescueTime<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl RescueTime<HttpTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, HttpTransport::new())
    }

    /// Client keyed from `RESCUETIME_API_KEY`.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }
}

impl<T: Transport> RescueTime<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches the analytic data report for `params`. Dates are pinned to
    /// `timezone` (an IANA identifier) when one is given, otherwise left as
    /// wall-clock values.
    pub fn get_analytic_data(
        &self,
        timezone: Option<&str>,
        params: &AnalyticDataQuery,
    ) -> Result<AnalyticData> {
        let api_key = self.api_key()?;
        let zone = decoder::resolve_timezone(timezone)?;

        let url = build_url(
            &self.config.analytic_data_url,
            api_key,
            &params.to_query_pairs(),
        )?;
        let body = self.fetch(&url)?;

        let mut data = decoder::decode_analytic_data_in(&body, zone)?;
        data.parameters = Some(params.clone());
        Ok(data)
    }

    /// Fetches the daily summary feed (one entry per recent day).
    pub fn get_daily_summary(&self) -> Result<Vec<DailySummary>> {
        let api_key = self.api_key()?;
        const NO_PARAMS: &[(&str, &str)] = &[];
        let url = build_url(&self.config.daily_summary_url, api_key, NO_PARAMS)?;
        let body = self.fetch(&url)?;

        serde_json::from_slice(&body).map_err(|e| {
            api_error(&body).unwrap_or_else(|| Error::MalformedResponse(e.to_string()))
        })
    }

    fn api_key(&self) -> Result<&str> {
        if !self.config.has_credential() {
            return Err(Error::MissingCredential);
        }
        Ok(self.config.api_key.trim())
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let redacted = redact_key(url);
        log::debug!("GET {}", redacted);
        let body = self.transport.get(url, self.config.timeout).map_err(|e| {
            log::warn!("GET {} failed: {}", redacted, e);
            e
        })?;
        log::debug!("Received {} bytes", body.len());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::time::Duration;

    /// Records requested URLs and replays a canned body.
    struct FakeTransport {
        body: Vec<u8>,
        requests: RefCell<Vec<String>>,
    }

    impl FakeTransport {
        fn new(body: &str) -> Self {
            Self {
                body: body.as_bytes().to_vec(),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for FakeTransport {
        fn get(&self, url: &str, _timeout: Duration) -> Result<Vec<u8>> {
            self.requests.borrow_mut().push(url.to_string());
            Ok(self.body.clone())
        }
    }

    const OVERVIEW: &str = r#"{
        "notes": "data is an array of arrays (rows), column names for rows in row_headers",
        "row_headers": ["Rank", "Time Spent (seconds)", "Number of People", "Activity", "Category", "Productivity"],
        "rows": [
            [1, 5280, 1, "rustc", "Editing & IDEs", 2],
            [2, 1200, 1, "slack", "General Communication & Scheduling", 0]
        ]
    }"#;

    #[test]
    fn missing_key_fails_before_any_request() {
        let transport = FakeTransport::new(OVERVIEW);
        let client = RescueTime::with_transport(ClientConfig::new(""), &transport);

        assert!(matches!(
            client.get_analytic_data(None, &AnalyticDataQuery::new()),
            Err(Error::MissingCredential)
        ));
        assert!(matches!(client.get_daily_summary(), Err(Error::MissingCredential)));
        assert!(transport.requests.borrow().is_empty());
    }

    #[test]
    fn unknown_timezone_fails_before_any_request() {
        let transport = FakeTransport::new(OVERVIEW);
        let client = RescueTime::with_transport(ClientConfig::new("k"), &transport);

        let err = client
            .get_analytic_data(Some("Nowhere/Special"), &AnalyticDataQuery::new())
            .unwrap_err();
        assert!(matches!(err, Error::UnknownTimezone(_)));
        assert!(transport.requests.borrow().is_empty());
    }

    #[test]
    fn analytic_data_request_and_decode() {
        let transport = FakeTransport::new(OVERVIEW);
        let client = RescueTime::with_transport(ClientConfig::new("B63key"), &transport);
        let params = AnalyticDataQuery::new()
            .perspective("rank")
            .restrict_kind("activity");

        let data = client.get_analytic_data(None, &params).unwrap();

        let requests = transport.requests.borrow();
        assert_eq!(
            requests.as_slice(),
            ["https://www.rescuetime.com/anapi/data?format=json&key=B63key&perspective=rank&restrict_kind=activity"]
        );
        assert_eq!(data.rows.len(), 2);
        assert_eq!(data.rows[0].activity.as_deref(), Some("rustc"));
        assert_eq!(data.rows[1].productivity, Some(0));
        assert_eq!(data.parameters, Some(params));
    }

    #[test]
    fn daily_summary_request_and_decode() {
        let transport = FakeTransport::new(
            r#"[{"id": 1, "date": "2023-05-01", "productivity_pulse": 81},
                {"id": 2, "date": "2023-04-30", "productivity_pulse": 64}]"#,
        );
        let config = ClientConfig::new("k").with_base_urls("http://localhost/data", "http://localhost/daily");
        let client = RescueTime::with_transport(config, &transport);

        let summaries = client.get_daily_summary().unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[1].productivity_pulse, 64.0);
        assert_eq!(
            transport.requests.borrow().as_slice(),
            ["http://localhost/daily?format=json&key=k"]
        );
    }

    #[test]
    fn daily_summary_surfaces_service_errors() {
        let transport = FakeTransport::new(r##"{"error": "# key not found", "messages": ""}"##);
        let client = RescueTime::with_transport(ClientConfig::new("bad"), &transport);
        assert!(matches!(
            client.get_daily_summary(),
            Err(Error::Api { ref message }) if message == "# key not found"
        ));
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let transport = FakeTransport::new("[]");
        let config = ClientConfig::new("k").with_base_urls("::nope::", "::nope::");
        let client = RescueTime::with_transport(config, &transport);
        assert!(matches!(
            client.get_daily_summary(),
            Err(Error::InvalidBaseUrl { .. })
        ));
    }
}
