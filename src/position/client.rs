use std::time::Duration;

use reqwest::blocking::Client;

use super::error::FetchError;
use super::parsing::parse_position;
use super::sample::Sample;

/// Anything that can produce one position fix per call.
pub trait PositionSource {
    fn fetch(&mut self) -> Result<Sample, FetchError>;
}

pub struct OpenNotifyClient {
    http: Client,
    endpoint: String,
}

impl OpenNotifyClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
        })
    }
}

impl PositionSource for OpenNotifyClient {
    fn fetch(&mut self) -> Result<Sample, FetchError> {
        let body = self
            .http
            .get(&self.endpoint)
            .send()?
            .error_for_status()?
            .text()?;
        log::debug!("Reading incoming response: {}", body);
        parse_position(&body)
    }
}
