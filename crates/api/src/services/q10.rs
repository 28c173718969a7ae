//! Q10 certificate portal client.
//!
//! Operators can check an attendee in from a Q10 enrollment-certificate
//! QR code. The code encodes a portal URL; this client verifies the URL
//! belongs to the configured portal, fetches the certificate page, and
//! scrapes the identification number out of the body.

use lazy_static::lazy_static;
use regex::Regex;
use std::time::Duration;
use thiserror::Error;

use crate::config::Q10Config;

lazy_static! {
    /// Identification numbers are 8 to 11 digits. The word boundary
    /// keeps longer digit runs (phone numbers, record IDs) from
    /// matching partially.
    static ref IDENTIFICATION_RE: Regex = Regex::new(r"\b\d{8,11}\b").unwrap();
}

#[derive(Debug, Error)]
pub enum Q10Error {
    #[error("URL is not on the configured certificate portal")]
    UrlNotAllowed,
    #[error("certificate page request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("no identification number found in certificate page")]
    NoIdentification,
}

/// HTTP client for the certificate portal.
#[derive(Clone)]
pub struct Q10Client {
    http: reqwest::Client,
    url_prefix: String,
}

impl Q10Client {
    pub fn new(config: &Q10Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            http,
            url_prefix: config.url_prefix.clone(),
        })
    }

    /// Fetch the certificate page behind `url` and extract the
    /// identification number from it.
    pub async fn extract_identification(&self, url: &str) -> Result<String, Q10Error> {
        if !url.starts_with(&self.url_prefix) {
            return Err(Q10Error::UrlNotAllowed);
        }
        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        extract_from_body(&body).ok_or(Q10Error::NoIdentification)
    }
}

/// First 8-to-11-digit run in the page body, if any.
fn extract_from_body(body: &str) -> Option<String> {
    IDENTIFICATION_RE
        .find(body)
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_identification_from_certificate_body() {
        let body = "<td>Documento de identidad</td><td>1002345678</td>";
        assert_eq!(extract_from_body(body), Some("1002345678".to_string()));
    }

    #[test]
    fn ignores_digit_runs_outside_the_length_range() {
        assert_eq!(extract_from_body("tel: 3012345"), None);
        assert_eq!(extract_from_body("folio 123456789012345"), None);
    }

    #[test]
    fn takes_the_first_match_when_several_qualify() {
        let body = "cc 52441199 ... exp 20250101";
        assert_eq!(extract_from_body(body), Some("52441199".to_string()));
    }

    #[tokio::test]
    async fn rejects_urls_off_the_portal() {
        let client = Q10Client::new(&Q10Config::default()).unwrap();
        let err = client
            .extract_identification("https://evil.example/Certificados/abc")
            .await
            .unwrap_err();
        assert!(matches!(err, Q10Error::UrlNotAllowed));
    }
}
